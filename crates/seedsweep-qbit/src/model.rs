//! Wire DTOs returned by `/api/v2/torrents/info`.

use seedsweep_torrent_core::TorrentRecord;
use serde::Deserialize;

/// Subset of the torrent info object the sweep consumes. Unknown fields are
/// ignored and missing ones decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QbitTorrent {
    /// Info hash.
    #[serde(default)]
    pub hash: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Absolute path to the payload (file or top-level folder).
    #[serde(default)]
    pub content_path: Option<String>,
    /// Directory the torrent was saved under.
    #[serde(default)]
    pub save_path: Option<String>,
}

impl From<QbitTorrent> for TorrentRecord {
    fn from(torrent: QbitTorrent) -> Self {
        Self {
            hash: non_empty(torrent.hash),
            name: torrent.name,
            content_path: torrent.content_path.unwrap_or_default(),
            save_path: torrent.save_path.and_then(non_empty),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
