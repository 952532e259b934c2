//! Listing interface implemented by daemon adapters.

use async_trait::async_trait;

use crate::error::TorrentResult;
use crate::model::{TorrentFilter, TorrentRecord};

/// Read-only view over a torrent daemon.
///
/// The sweep only ever needs the daemon's torrent list; adapters translate
/// their wire protocol into [`TorrentRecord`]s.
#[async_trait]
pub trait TorrentLister: Send + Sync {
    /// List torrents matching `filter`, in daemon order.
    async fn list_torrents(&self, filter: TorrentFilter) -> TorrentResult<Vec<TorrentRecord>>;

    /// List torrents whose payload is complete.
    async fn list_completed(&self) -> TorrentResult<Vec<TorrentRecord>> {
        self.list_torrents(TorrentFilter::Completed).await
    }
}
