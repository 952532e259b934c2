//! Error types for torrent daemon interactions.

use std::error::Error;

use thiserror::Error;

/// Primary error type for daemon queries.
#[derive(Debug, Error)]
pub enum TorrentError {
    /// The daemon could not be reached (connection refused, DNS, timeout).
    #[error("torrent daemon unreachable")]
    Unreachable {
        /// Endpoint the request was sent to.
        endpoint: String,
        /// Underlying transport failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The daemon refused the supplied credentials.
    #[error("torrent daemon rejected credentials")]
    AuthenticationRejected {
        /// Endpoint that rejected the login.
        endpoint: String,
        /// HTTP status when the rejection carried one.
        status: Option<u16>,
    },
    /// The daemon answered with a non-success status.
    #[error("torrent daemon query failed")]
    QueryFailed {
        /// Operation identifier.
        operation: &'static str,
        /// HTTP status returned by the daemon.
        status: u16,
        /// Response body excerpt when one was returned.
        detail: Option<String>,
    },
    /// The daemon's response could not be decoded.
    #[error("torrent daemon response could not be decoded")]
    Decode {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying decode failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl TorrentError {
    /// Returns `true` when the failure happened before the daemon answered.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }
}

/// Convenience alias for daemon query results.
pub type TorrentResult<T> = Result<T, TorrentError>;
