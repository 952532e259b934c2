//! Directory reconciliation: plan and apply guarded deletions.
//!
//! # Design
//! - Listing failures are fatal and happen before any deletion decision.
//! - Every unprotected name passes the path guard before it becomes a candidate.
//! - Deletion is best-effort per entry; one failure never aborts the pass.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::error::{FsOpsError, FsOpsResult};
use crate::model::TargetDirectory;
use crate::paths::normalize_lexically;
use crate::protect::ProtectedSet;

/// Whether unowned entries are removed or only reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReconcileMode {
    /// Report candidates without touching the filesystem.
    #[default]
    DryRun,
    /// Recursively remove every candidate.
    Execute,
}

impl ReconcileMode {
    /// Pick the mode from a dry-run toggle.
    #[must_use]
    pub const fn from_dry_run(dry_run: bool) -> Self {
        if dry_run { Self::DryRun } else { Self::Execute }
    }

    /// Stable identifier used in logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DryRun => "dry_run",
            Self::Execute => "execute",
        }
    }
}

/// Reasons the path guard refuses to compose a deletion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardViolation {
    /// The listed name is empty.
    EmptyName,
    /// The composed path leaves the target directory.
    EscapesTarget,
    /// The composed path is the target directory itself.
    ResolvesToTarget,
    /// The composed path is inside the target but not a direct child.
    NotDirectChild,
}

impl GuardViolation {
    /// Stable identifier used in logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::EscapesTarget => "escapes_target",
            Self::ResolvesToTarget => "resolves_to_target",
            Self::NotDirectChild => "not_direct_child",
        }
    }
}

/// An unprotected entry that passed the path guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionCandidate {
    /// Entry name as listed.
    pub name: OsString,
    /// Composed absolute path inside the local target directory.
    pub path: PathBuf,
}

/// An unprotected entry the path guard refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    /// Entry name as listed.
    pub name: OsString,
    /// Why the guard refused it.
    pub violation: GuardViolation,
}

/// Partition of one directory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionPlan {
    /// Listed names present in the protected set.
    pub kept: Vec<OsString>,
    /// Names eligible for deletion.
    pub candidates: Vec<DeletionCandidate>,
    /// Names refused by the path guard.
    pub rejected: Vec<RejectedEntry>,
}

/// What happened to one candidate.
#[derive(Debug)]
pub enum DeletionOutcome {
    /// Dry-run: the entry would have been removed.
    WouldDelete,
    /// The entry was removed.
    Deleted,
    /// Removal failed; the pass continued.
    Failed(FsOpsError),
}

/// A candidate together with its outcome.
#[derive(Debug)]
pub struct DeletionRecord {
    /// The candidate acted upon.
    pub candidate: DeletionCandidate,
    /// Outcome of the action.
    pub outcome: DeletionOutcome,
}

/// Auditable summary of one reconciliation pass.
#[derive(Debug)]
pub struct ReconcileReport {
    /// Mode the pass ran in.
    pub mode: ReconcileMode,
    /// Listed names that were protected.
    pub kept: Vec<OsString>,
    /// Names refused by the path guard.
    pub rejected: Vec<RejectedEntry>,
    /// Every candidate with its outcome, in listing order.
    pub deletions: Vec<DeletionRecord>,
}

impl ReconcileReport {
    /// Number of entries actually removed.
    #[must_use]
    pub fn deleted_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, DeletionOutcome::Deleted))
    }

    /// Number of entries reported in dry-run mode.
    #[must_use]
    pub fn would_delete_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, DeletionOutcome::WouldDelete))
    }

    /// Number of removals that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, DeletionOutcome::Failed(_)))
    }

    /// Returns `true` when any candidate failed or was refused by the guard.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0 || !self.rejected.is_empty()
    }

    fn count(&self, predicate: impl Fn(&DeletionOutcome) -> bool) -> usize {
        self.deletions
            .iter()
            .filter(|record| predicate(&record.outcome))
            .count()
    }
}

/// List the direct children of `dir`, sorted by name.
///
/// # Errors
///
/// Returns [`FsOpsError::DirectoryUnreadable`] when the directory or any of
/// its entries cannot be read.
pub fn list_entries(dir: &Path) -> FsOpsResult<Vec<OsString>> {
    let entries = fs::read_dir(dir).map_err(|err| FsOpsError::unreadable(dir, err))?;
    let mut names = entries
        .map(|entry| entry.map(|entry| entry.file_name()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(|err| FsOpsError::unreadable(dir, err))?;
    names.sort_unstable();
    Ok(names)
}

/// Compose the deletion path for `name` inside `target`, refusing anything
/// that is not lexically a direct child of the normalized target.
///
/// # Errors
///
/// Returns the [`GuardViolation`] that blocked composition.
pub fn guard_deletion_path(target: &Path, name: &OsStr) -> Result<PathBuf, GuardViolation> {
    if name.is_empty() {
        return Err(GuardViolation::EmptyName);
    }
    let composed = normalize_lexically(&target.join(name));
    if !composed.starts_with(target) {
        return Err(GuardViolation::EscapesTarget);
    }
    if composed == target {
        return Err(GuardViolation::ResolvesToTarget);
    }
    if composed.parent() != Some(target) {
        return Err(GuardViolation::NotDirectChild);
    }
    Ok(composed)
}

/// Partition `listing` into kept names, guarded candidates and rejections.
#[must_use]
pub fn plan_deletions(
    target: &TargetDirectory,
    listing: &[OsString],
    protected: &ProtectedSet,
) -> DeletionPlan {
    let mut plan = DeletionPlan::default();
    for name in listing {
        if protected.contains(name) {
            plan.kept.push(name.clone());
            continue;
        }
        match guard_deletion_path(target.local(), name) {
            Ok(path) => plan.candidates.push(DeletionCandidate {
                name: name.clone(),
                path,
            }),
            Err(violation) => {
                error!(
                    entry = %name.to_string_lossy(),
                    target = %target.local().display(),
                    violation = violation.as_str(),
                    "suspicious entry refused by path guard"
                );
                plan.rejected.push(RejectedEntry {
                    name: name.clone(),
                    violation,
                });
            }
        }
    }
    plan
}

/// Runs one reconciliation pass over a target directory.
#[derive(Debug, Clone, Copy)]
pub struct Reconciler<'a> {
    target: &'a TargetDirectory,
    mode: ReconcileMode,
}

impl<'a> Reconciler<'a> {
    /// Bind the reconciler to a target and a mode for the whole pass.
    #[must_use]
    pub const fn new(target: &'a TargetDirectory, mode: ReconcileMode) -> Self {
        Self { target, mode }
    }

    /// List the target directory, plan against `protected`, and apply.
    ///
    /// # Errors
    ///
    /// Returns [`FsOpsError::DirectoryUnreadable`] when the listing fails; no
    /// entry is touched in that case. Per-entry failures are recorded in the
    /// report instead.
    pub fn run(&self, protected: &ProtectedSet) -> FsOpsResult<ReconcileReport> {
        let listing = list_entries(self.target.local())?;
        let plan = plan_deletions(self.target, &listing, protected);
        Ok(self.apply(plan))
    }

    /// Apply a precomputed plan.
    #[must_use]
    pub fn apply(&self, plan: DeletionPlan) -> ReconcileReport {
        let deletions = plan
            .candidates
            .into_iter()
            .map(|candidate| {
                let outcome = self.act_on(&candidate);
                DeletionRecord { candidate, outcome }
            })
            .collect();

        ReconcileReport {
            mode: self.mode,
            kept: plan.kept,
            rejected: plan.rejected,
            deletions,
        }
    }

    fn act_on(&self, candidate: &DeletionCandidate) -> DeletionOutcome {
        match self.mode {
            ReconcileMode::DryRun => {
                info!(path = %candidate.path.display(), "dry-run, not deleting");
                DeletionOutcome::WouldDelete
            }
            ReconcileMode::Execute => {
                info!(path = %candidate.path.display(), "deleting unowned entry");
                match remove_entry(&candidate.path) {
                    Ok(()) => DeletionOutcome::Deleted,
                    Err(err) => {
                        warn!(
                            path = %candidate.path.display(),
                            error = %err,
                            "failed to delete unowned entry"
                        );
                        DeletionOutcome::Failed(FsOpsError::deletion(&candidate.path, err))
                    }
                }
            }
        }
    }
}

/// Remove a file, symlink or directory tree without following symlinks.
fn remove_entry(path: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(path)?;
    if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{ClassifyError, MatchRule, ProtectedEntry};

    fn protected(names: &[&str]) -> Result<ProtectedSet, ClassifyError> {
        names
            .iter()
            .map(|name| ProtectedEntry::new(OsStr::new(name), MatchRule::SingleFile))
            .collect()
    }

    fn listing(names: &[&str]) -> Vec<OsString> {
        names.iter().map(OsString::from).collect()
    }

    #[test]
    fn guard_accepts_plain_children() -> Result<(), GuardViolation> {
        let target = Path::new("/downloads");
        assert_eq!(
            guard_deletion_path(target, OsStr::new("B"))?,
            PathBuf::from("/downloads/B")
        );
        assert_eq!(
            guard_deletion_path(target, OsStr::new("..hidden"))?,
            PathBuf::from("/downloads/..hidden")
        );
        Ok(())
    }

    #[test]
    fn guard_rejects_engineered_names() {
        let target = Path::new("/downloads");
        let cases = [
            ("", GuardViolation::EmptyName),
            ("..", GuardViolation::EscapesTarget),
            ("../etc", GuardViolation::EscapesTarget),
            ("/etc", GuardViolation::EscapesTarget),
            ("x/../../etc", GuardViolation::EscapesTarget),
            (".", GuardViolation::ResolvesToTarget),
            ("a/..", GuardViolation::ResolvesToTarget),
            ("a/b", GuardViolation::NotDirectChild),
        ];
        for (name, expected) in cases {
            assert_eq!(
                guard_deletion_path(target, OsStr::new(name)),
                Err(expected),
                "{name:?}"
            );
        }
    }

    #[test]
    fn plan_is_listing_minus_protected() -> Result<(), Box<dyn std::error::Error>> {
        let target = TargetDirectory::new("/downloads", None)?;
        let plan = plan_deletions(&target, &listing(&["A", "B", "C"]), &protected(&["A"])?);
        assert_eq!(plan.kept, listing(&["A"]));
        let names: Vec<_> = plan.candidates.iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, listing(&["B", "C"]));
        assert_eq!(plan.candidates[0].path, PathBuf::from("/downloads/B"));
        assert!(plan.rejected.is_empty());
        Ok(())
    }

    #[test]
    fn plan_routes_engineered_names_to_rejections() -> Result<(), Box<dyn std::error::Error>> {
        let target = TargetDirectory::new("/downloads", None)?;
        let plan = plan_deletions(&target, &listing(&["", "../etc", "ok"]), &ProtectedSet::default());
        assert_eq!(plan.candidates.len(), 1);
        assert_eq!(plan.candidates[0].name, OsString::from("ok"));
        assert_eq!(
            plan.rejected
                .iter()
                .map(|rejected| rejected.violation)
                .collect::<Vec<_>>(),
            vec![GuardViolation::EmptyName, GuardViolation::EscapesTarget]
        );
        Ok(())
    }

    #[test]
    fn plan_uses_local_view_for_paths() -> Result<(), Box<dyn std::error::Error>> {
        let target = TargetDirectory::new("/mnt/pool/torrents", Some(Path::new("/downloads")))?;
        let plan = plan_deletions(&target, &listing(&["B"]), &ProtectedSet::default());
        assert_eq!(plan.candidates[0].path, PathBuf::from("/mnt/pool/torrents/B"));
        Ok(())
    }

    #[test]
    fn mode_from_dry_run_toggle() {
        assert_eq!(ReconcileMode::from_dry_run(true), ReconcileMode::DryRun);
        assert_eq!(ReconcileMode::from_dry_run(false), ReconcileMode::Execute);
        assert_eq!(ReconcileMode::default(), ReconcileMode::DryRun);
    }
}
