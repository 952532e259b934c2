//! Lexical path normalization.
//!
//! Every comparison in the sweep happens on normalized paths so that
//! `/data/torrents/`, `/data/./torrents` and `/data/x/../torrents` agree.
//! Normalization never touches the filesystem: symlinks are not resolved.

use std::path::{Component, Path, PathBuf};

/// Normalize `path` without consulting the filesystem.
///
/// Trailing and repeated separators and `.` segments are dropped, and `..`
/// removes the preceding normal segment. A `..` directly under the root stays
/// at the root; leading `..` segments of a relative path are preserved. An
/// empty input yields an empty path.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir | Component::CurDir) | None => normalized.push(".."),
            },
            Component::Normal(segment) => normalized.push(segment),
        }
    }
    normalized
}

/// Returns `true` when `path` is the filesystem root (or a bare prefix).
pub(crate) fn is_root(path: &Path) -> bool {
    path.has_root() && path.parent().is_none()
}
