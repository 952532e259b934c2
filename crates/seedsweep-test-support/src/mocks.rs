//! Fixture implementations of the torrent listing interface.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use seedsweep_torrent_core::{
    TorrentError, TorrentFilter, TorrentLister, TorrentRecord, TorrentResult,
};

/// Lister returning a fixed record list for every filter.
#[derive(Debug, Default)]
pub struct StaticLister {
    records: Vec<TorrentRecord>,
    calls: AtomicUsize,
}

impl StaticLister {
    /// Serve `records` on every call.
    #[must_use]
    pub const fn new(records: Vec<TorrentRecord>) -> Self {
        Self {
            records,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of list calls served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TorrentLister for StaticLister {
    async fn list_torrents(&self, _filter: TorrentFilter) -> TorrentResult<Vec<TorrentRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }
}

/// Lister that always fails as if the daemon were down.
#[derive(Debug, Clone, Default)]
pub struct UnreachableLister {
    endpoint: String,
}

impl UnreachableLister {
    /// Fail every call with an unreachable error naming `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl TorrentLister for UnreachableLister {
    async fn list_torrents(&self, _filter: TorrentFilter) -> TorrentResult<Vec<TorrentRecord>> {
        Err(TorrentError::Unreachable {
            endpoint: self.endpoint.clone(),
            source: Box::new(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )),
        })
    }
}
