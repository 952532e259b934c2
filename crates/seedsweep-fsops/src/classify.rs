//! Path classification: which entry of the target directory a torrent owns.
//!
//! # Design
//! - Pure function of the record and the daemon-side target path.
//! - The save path, when reported, is authoritative; directory depth is the fallback.
//! - Derivation is component-wise so separators and prefixes never need slicing.

use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

use seedsweep_torrent_core::TorrentRecord;
use thiserror::Error;

use crate::paths::normalize_lexically;

/// How a protected entry was derived from its torrent record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// First segment of the content path after a save path equal to the target.
    SavePath,
    /// Save path lives below the target; the entry is the save path's top folder.
    NestedSavePath,
    /// Content path sits directly inside the target.
    SingleFile,
    /// Content path sits one folder below the target.
    MultiFile,
}

impl MatchRule {
    /// Stable identifier used in logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SavePath => "save_path",
            Self::NestedSavePath => "nested_save_path",
            Self::SingleFile => "single_file",
            Self::MultiFile => "multi_file",
        }
    }
}

/// A direct child of the target directory that must survive the sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedEntry {
    name: OsString,
    rule: MatchRule,
}

impl ProtectedEntry {
    /// Build an entry from a single path segment.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::InvalidEntryName`] unless `name` is exactly one
    /// normal path segment (not empty, `.`, `..`, or anything with a separator).
    pub fn new(name: &OsStr, rule: MatchRule) -> Result<Self, ClassifyError> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(segment)), None) if segment == name => Ok(Self {
                name: name.to_os_string(),
                rule,
            }),
            _ => Err(ClassifyError::InvalidEntryName {
                name: name.to_string_lossy().into_owned(),
            }),
        }
    }

    /// Entry name relative to the target directory.
    #[must_use]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Rule that produced the entry.
    #[must_use]
    pub const fn rule(&self) -> MatchRule {
        self.rule
    }

    pub(crate) fn into_name(self) -> OsString {
        self.name
    }
}

/// Result of classifying one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The torrent owns this entry of the target directory.
    Protected(ProtectedEntry),
    /// The torrent lives outside the target directory.
    OutOfScope,
}

/// Records that cannot be classified safely. These are skipped, never treated
/// as protecting nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The daemon reported no content path.
    #[error("torrent content path is empty")]
    EmptyContentPath,
    /// The content path is not absolute after normalization.
    #[error("torrent content path is not absolute")]
    RelativeContentPath {
        /// Content path as reported.
        content_path: String,
    },
    /// The torrent's payload is the target directory or one of its ancestors.
    #[error("torrent resolves to the target directory itself")]
    ResolvesToTarget {
        /// Content path as reported.
        content_path: String,
    },
    /// The derived entry name is not a single usable path segment.
    #[error("derived entry name is invalid")]
    InvalidEntryName {
        /// Offending name.
        name: String,
    },
}

impl ClassifyError {
    /// Stable identifier used in logs and reports.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::EmptyContentPath => "empty_content_path",
            Self::RelativeContentPath { .. } => "relative_content_path",
            Self::ResolvesToTarget { .. } => "resolves_to_target",
            Self::InvalidEntryName { .. } => "invalid_entry_name",
        }
    }
}

/// Decide which entry of `target` (daemon-side, normalized) `record` protects.
///
/// # Errors
///
/// Returns a [`ClassifyError`] when the record is anomalous: empty or relative
/// content path, a payload that is the target itself or contains it, or a
/// derived name that is not a single path segment.
pub fn classify(record: &TorrentRecord, target: &Path) -> Result<Classification, ClassifyError> {
    if record.content_path.trim().is_empty() {
        return Err(ClassifyError::EmptyContentPath);
    }

    let content = normalize_lexically(Path::new(&record.content_path));
    if !content.is_absolute() {
        return Err(ClassifyError::RelativeContentPath {
            content_path: record.content_path.clone(),
        });
    }
    if target.starts_with(&content) {
        return Err(ClassifyError::ResolvesToTarget {
            content_path: record.content_path.clone(),
        });
    }

    if let Some(classification) = classify_by_save_path(record, &content, target)? {
        return Ok(classification);
    }
    classify_by_depth(&content, target)
}

/// Save-path derivation. `Ok(None)` means the save path is absent or
/// malformed and the depth heuristics should decide.
fn classify_by_save_path(
    record: &TorrentRecord,
    content: &Path,
    target: &Path,
) -> Result<Option<Classification>, ClassifyError> {
    let Some(raw) = record.save_path.as_deref() else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let save = normalize_lexically(Path::new(raw));
    if !save.is_absolute() {
        return Ok(None);
    }
    let Some(segment) = content
        .strip_prefix(&save)
        .ok()
        .and_then(first_normal_segment)
    else {
        return Ok(None);
    };

    if save == target {
        return ProtectedEntry::new(segment, MatchRule::SavePath)
            .map(|entry| Some(Classification::Protected(entry)));
    }

    if let Some(top) = save.strip_prefix(target).ok().and_then(first_normal_segment) {
        return ProtectedEntry::new(top, MatchRule::NestedSavePath)
            .map(|entry| Some(Classification::Protected(entry)));
    }

    let torrent_root: PathBuf = save.join(segment);
    if target.starts_with(&torrent_root) {
        return Err(ClassifyError::ResolvesToTarget {
            content_path: record.content_path.clone(),
        });
    }

    Ok(Some(Classification::OutOfScope))
}

fn classify_by_depth(content: &Path, target: &Path) -> Result<Classification, ClassifyError> {
    let Some(parent) = content.parent() else {
        return Ok(Classification::OutOfScope);
    };

    if parent == target {
        return entry_from_file_name(content, MatchRule::SingleFile).map(Classification::Protected);
    }
    if parent.parent() == Some(target) {
        return entry_from_file_name(parent, MatchRule::MultiFile).map(Classification::Protected);
    }
    Ok(Classification::OutOfScope)
}

fn entry_from_file_name(path: &Path, rule: MatchRule) -> Result<ProtectedEntry, ClassifyError> {
    let name = path.file_name().unwrap_or_default();
    ProtectedEntry::new(name, rule)
}

fn first_normal_segment(path: &Path) -> Option<&OsStr> {
    match path.components().next() {
        Some(Component::Normal(segment)) => Some(segment),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: &str = "/downloads";

    fn protected(record: &TorrentRecord) -> Result<(String, MatchRule), ClassifyError> {
        match classify(record, Path::new(TARGET))? {
            Classification::Protected(entry) => Ok((
                entry.name().to_string_lossy().into_owned(),
                entry.rule(),
            )),
            Classification::OutOfScope => Err(ClassifyError::InvalidEntryName {
                name: "<out of scope>".into(),
            }),
        }
    }

    #[test]
    fn single_file_protects_base_name() -> Result<(), ClassifyError> {
        for name in ["A", "movie.mkv", "with space.iso", ".hidden"] {
            let record = TorrentRecord::new(name, format!("{TARGET}/{name}"));
            assert_eq!(protected(&record)?, (name.to_string(), MatchRule::SingleFile));
        }
        Ok(())
    }

    #[test]
    fn multi_file_protects_intermediate_folder() -> Result<(), ClassifyError> {
        let record = TorrentRecord::new("Show", "/downloads/Show.S01/episode1.mkv");
        assert_eq!(
            protected(&record)?,
            ("Show.S01".to_string(), MatchRule::MultiFile)
        );
        Ok(())
    }

    #[test]
    fn content_path_is_normalized_before_matching() -> Result<(), ClassifyError> {
        let record = TorrentRecord::new("A", "/downloads/./x/../A/");
        assert_eq!(protected(&record)?, ("A".to_string(), MatchRule::SingleFile));
        Ok(())
    }

    #[test]
    fn out_of_target_content_is_out_of_scope() -> Result<(), ClassifyError> {
        for content in [
            "/elsewhere/A",
            "/elsewhere/Show/episode1.mkv",
            "/downloads/a/b/c.mkv",
            "/downloadsX/A",
        ] {
            let record = TorrentRecord::new("x", content);
            assert_eq!(
                classify(&record, Path::new(TARGET))?,
                Classification::OutOfScope,
                "{content}"
            );
        }
        Ok(())
    }

    #[test]
    fn save_path_selects_next_segment_regardless_of_depth() -> Result<(), ClassifyError> {
        for content in [
            "/downloads/Album",
            "/downloads/Album/track.flac",
            "/downloads/Album/CD1/track.flac",
            "/downloads/Album/CD1/scans/cover.jpg",
        ] {
            let record = TorrentRecord::new("Album", content).with_save_path("/downloads/");
            assert_eq!(
                protected(&record)?,
                ("Album".to_string(), MatchRule::SavePath),
                "{content}"
            );
        }
        Ok(())
    }

    #[test]
    fn save_path_wins_over_depth_heuristics() -> Result<(), ClassifyError> {
        // Depth alone would pick "deep" (multi-file); the save path says "Pack".
        let record =
            TorrentRecord::new("Pack", "/downloads/Pack/deep/file.bin").with_save_path("/downloads");
        assert_eq!(protected(&record)?, ("Pack".to_string(), MatchRule::SavePath));
        Ok(())
    }

    #[test]
    fn save_path_matching_is_component_wise() -> Result<(), ClassifyError> {
        // "/down" is a string prefix of the content path but not a component prefix.
        let record = TorrentRecord::new("A", "/downloads/A").with_save_path("/down");
        assert_eq!(protected(&record)?, ("A".to_string(), MatchRule::SingleFile));
        Ok(())
    }

    #[test]
    fn malformed_save_path_falls_back_to_depth() -> Result<(), ClassifyError> {
        let cases = [
            ("/other", "/downloads/Show/e1.mkv"),
            ("relative/dir", "/downloads/Show/e1.mkv"),
            ("", "/downloads/Show/e1.mkv"),
            ("/downloads/Show/e1.mkv", "/downloads/Show/e1.mkv"),
        ];
        for (save, content) in cases {
            let record = TorrentRecord::new("Show", content).with_save_path(save);
            assert_eq!(
                protected(&record)?,
                ("Show".to_string(), MatchRule::MultiFile),
                "save path {save:?}"
            );
        }
        Ok(())
    }

    #[test]
    fn nested_save_path_protects_top_level_folder() -> Result<(), ClassifyError> {
        let record = TorrentRecord::new("Film", "/downloads/movies/Film/film.mkv")
            .with_save_path("/downloads/movies");
        assert_eq!(
            protected(&record)?,
            ("movies".to_string(), MatchRule::NestedSavePath)
        );
        Ok(())
    }

    #[test]
    fn save_path_outside_target_is_out_of_scope() -> Result<(), ClassifyError> {
        let record =
            TorrentRecord::new("Film", "/archive/Film/film.mkv").with_save_path("/archive");
        assert_eq!(
            classify(&record, Path::new(TARGET))?,
            Classification::OutOfScope
        );
        Ok(())
    }

    #[test]
    fn empty_content_path_is_rejected() {
        for content in ["", "   "] {
            let record = TorrentRecord::new("empty", content).with_save_path(TARGET);
            assert_eq!(
                classify(&record, Path::new(TARGET)),
                Err(ClassifyError::EmptyContentPath)
            );
        }
    }

    #[test]
    fn relative_content_path_is_rejected() {
        let record = TorrentRecord::new("rel", "downloads/A");
        assert!(matches!(
            classify(&record, Path::new(TARGET)),
            Err(ClassifyError::RelativeContentPath { .. })
        ));
    }

    #[test]
    fn content_at_or_above_target_is_rejected() {
        for content in ["/downloads", "/downloads/", "/", "/downloads/A/.."] {
            let record = TorrentRecord::new("whole", content);
            let result = classify(&record, Path::new(TARGET));
            assert!(
                matches!(result, Err(ClassifyError::ResolvesToTarget { .. })),
                "{content}: {result:?}"
            );
        }
    }

    #[test]
    fn torrent_root_containing_target_is_rejected() {
        let record =
            TorrentRecord::new("root", "/data/downloads/A/file.bin").with_save_path("/data");
        let result = classify(&record, Path::new("/data/downloads"));
        assert!(matches!(result, Err(ClassifyError::ResolvesToTarget { .. })));
    }

    #[test]
    fn protected_entry_rejects_degenerate_names() {
        for name in ["", ".", "..", "a/b", "/", "/etc"] {
            assert!(
                ProtectedEntry::new(OsStr::new(name), MatchRule::SingleFile).is_err(),
                "{name:?} should be rejected"
            );
        }
        assert!(ProtectedEntry::new(OsStr::new("ok"), MatchRule::SingleFile).is_ok());
    }

    #[test]
    fn reasons_are_stable() {
        assert_eq!(ClassifyError::EmptyContentPath.reason(), "empty_content_path");
        assert_eq!(MatchRule::MultiFile.as_str(), "multi_file");
    }
}
