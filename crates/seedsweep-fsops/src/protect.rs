//! Protected set construction.

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};

use seedsweep_torrent_core::TorrentRecord;
use tracing::{debug, warn};

use crate::classify::{Classification, ClassifyError, ProtectedEntry, classify};
use crate::model::TargetDirectory;

/// Names of target-directory children owned by at least one torrent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectedSet {
    names: HashSet<OsString>,
}

impl ProtectedSet {
    /// Add an entry; returns `false` when the name was already protected.
    pub fn insert(&mut self, entry: ProtectedEntry) -> bool {
        self.names.insert(entry.into_name())
    }

    /// Exact, case-sensitive membership test.
    #[must_use]
    pub fn contains(&self, name: &OsStr) -> bool {
        self.names.contains(name)
    }

    /// Number of distinct protected names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when nothing is protected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Protected names in sorted order.
    #[must_use]
    pub fn sorted_names(&self) -> Vec<&OsStr> {
        let mut names: Vec<&OsStr> = self.names.iter().map(OsString::as_os_str).collect();
        names.sort_unstable();
        names
    }
}

impl FromIterator<ProtectedEntry> for ProtectedSet {
    fn from_iter<I: IntoIterator<Item = ProtectedEntry>>(iter: I) -> Self {
        let mut set = Self::default();
        for entry in iter {
            set.insert(entry);
        }
        set
    }
}

/// A torrent record that was skipped because it could not be classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordAnomaly {
    /// Torrent label (name or hash).
    pub torrent: String,
    /// Content path as reported by the daemon.
    pub content_path: String,
    /// Why the record was skipped.
    pub error: ClassifyError,
}

/// Outcome of folding every torrent record into a protected set.
#[derive(Debug, Clone, Default)]
pub struct ProtectedSetReport {
    /// The protected names.
    pub set: ProtectedSet,
    /// Records that produced a protected entry.
    pub classified: usize,
    /// Records saved outside the target directory.
    pub out_of_scope: usize,
    /// Records skipped as anomalies.
    pub anomalies: Vec<RecordAnomaly>,
}

/// Classify every record against the daemon-side view of `target`.
///
/// Duplicate names collapse silently. Anomalous records are skipped and
/// reported; they never contribute an entry.
#[must_use]
pub fn build_protected_set(records: &[TorrentRecord], target: &TargetDirectory) -> ProtectedSetReport {
    let mut report = ProtectedSetReport::default();
    for record in records {
        match classify(record, target.daemon_view()) {
            Ok(Classification::Protected(entry)) => {
                debug!(
                    torrent = record.label(),
                    entry = %entry.name().to_string_lossy(),
                    rule = entry.rule().as_str(),
                    "torrent protects entry"
                );
                report.classified += 1;
                report.set.insert(entry);
            }
            Ok(Classification::OutOfScope) => {
                debug!(
                    torrent = record.label(),
                    content_path = %record.content_path,
                    "torrent saved outside target directory"
                );
                report.out_of_scope += 1;
            }
            Err(error) => {
                warn!(
                    torrent = record.label(),
                    content_path = %record.content_path,
                    reason = error.reason(),
                    "skipping unclassifiable torrent record"
                );
                report.anomalies.push(RecordAnomaly {
                    torrent: record.label().to_string(),
                    content_path: record.content_path.clone(),
                    error,
                });
            }
        }
    }
    debug!(
        protected = report.set.len(),
        out_of_scope = report.out_of_scope,
        anomalies = report.anomalies.len(),
        "protected set built"
    );
    report
}
