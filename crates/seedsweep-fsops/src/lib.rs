//! Reconciliation of a download directory against a torrent daemon's view.
//!
//! Layout:
//! - `paths.rs`: lexical normalization shared by every comparison
//! - `model/`: the target directory in its local and daemon-side views
//! - `classify.rs`: maps one torrent record to the entry it protects
//! - `protect.rs`: folds classified records into the protected set
//! - `reconcile.rs`: plans and applies guarded deletions
#![forbid(unsafe_code)]
#![deny(
    dead_code,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions, clippy::multiple_crate_versions)]

pub mod classify;
pub mod error;
pub mod model;
pub mod paths;
pub mod protect;
pub mod reconcile;

pub use classify::{Classification, ClassifyError, MatchRule, ProtectedEntry, classify};
pub use error::{FsOpsError, FsOpsResult};
pub use model::TargetDirectory;
pub use paths::normalize_lexically;
pub use protect::{ProtectedSet, ProtectedSetReport, RecordAnomaly, build_protected_set};
pub use reconcile::{
    DeletionCandidate, DeletionOutcome, DeletionPlan, DeletionRecord, GuardViolation,
    ReconcileMode, ReconcileReport, Reconciler, RejectedEntry, guard_deletion_path, list_entries,
    plan_deletions,
};
