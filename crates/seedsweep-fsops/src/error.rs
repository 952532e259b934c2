//! # Design
//!
//! - Provide structured, constant-message errors for the reconciliation pass.
//! - Capture operation context (paths, fields, inputs) so reports can name what failed.
//! - Preserve source errors without interpolating context into error messages.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for filesystem operations.
pub type FsOpsResult<T> = Result<T, FsOpsError>;

/// Errors produced while reconciling the target directory.
#[derive(Debug, Error)]
pub enum FsOpsError {
    /// The target directory could not be listed.
    #[error("target directory unreadable")]
    DirectoryUnreadable {
        /// Directory that failed to list.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Removing an unowned entry failed.
    #[error("deletion failed")]
    DeletionFailed {
        /// Entry that could not be removed.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Input validation failures.
    #[error("fsops invalid input")]
    InvalidInput {
        /// Field that failed validation.
        field: &'static str,
        /// Static reason for the failure.
        reason: &'static str,
        /// Offending value when available.
        value: Option<String>,
    },
}

impl FsOpsError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DirectoryUnreadable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn deletion(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DeletionFailed {
            path: path.into(),
            source,
        }
    }

    pub(crate) const fn invalid_input(
        field: &'static str,
        reason: &'static str,
        value: Option<String>,
    ) -> Self {
        Self::InvalidInput {
            field,
            reason,
            value,
        }
    }
}
