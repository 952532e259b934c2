//! Domain models for the reconciliation pass.
//!
//! # Design
//! - The local path is the only path ever handed to filesystem calls.
//! - The daemon-side path is used for matching torrent paths and nothing else.

use std::path::{Path, PathBuf};

use crate::error::{FsOpsError, FsOpsResult};
use crate::paths::{is_root, normalize_lexically};

/// Directory being swept, in both the local and the daemon's view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDirectory {
    local: PathBuf,
    daemon_view: PathBuf,
}

impl TargetDirectory {
    /// Build a target from a local path and an optional daemon-side path.
    ///
    /// Both paths are normalized lexically. When `daemon_view` is `None` the
    /// daemon is assumed to share the local view.
    ///
    /// # Errors
    ///
    /// Returns [`FsOpsError::InvalidInput`] when either path is empty,
    /// relative, or the filesystem root.
    pub fn new(local: impl AsRef<Path>, daemon_view: Option<&Path>) -> FsOpsResult<Self> {
        let local = validate_directory("local", local.as_ref())?;
        let daemon_view = match daemon_view {
            Some(path) => validate_directory("daemon_view", path)?,
            None => local.clone(),
        };
        Ok(Self { local, daemon_view })
    }

    /// Normalized local path; the only path used for filesystem operations.
    #[must_use]
    pub fn local(&self) -> &Path {
        &self.local
    }

    /// Normalized daemon-side path used to classify torrent content paths.
    #[must_use]
    pub fn daemon_view(&self) -> &Path {
        &self.daemon_view
    }

    /// Returns `true` when the daemon sees the directory under another path.
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        self.local != self.daemon_view
    }
}

fn validate_directory(field: &'static str, raw: &Path) -> FsOpsResult<PathBuf> {
    let normalized = normalize_lexically(raw);
    let value = || Some(raw.to_string_lossy().into_owned());
    if normalized.as_os_str().is_empty() {
        return Err(FsOpsError::invalid_input(field, "empty", value()));
    }
    if !normalized.is_absolute() {
        return Err(FsOpsError::invalid_input(field, "not_absolute", value()));
    }
    if is_root(&normalized) {
        return Err(FsOpsError::invalid_input(field, "filesystem_root", value()));
    }
    Ok(normalized)
}
