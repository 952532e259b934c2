//! Torrent records as reported by a download daemon.

use serde::{Deserialize, Serialize};

/// Status filter applied when asking the daemon for its torrents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TorrentFilter {
    /// Every torrent regardless of state.
    All,
    /// Torrents whose payload is fully downloaded.
    #[default]
    Completed,
    /// Torrents currently seeding.
    Seeding,
    /// Torrents still downloading.
    Downloading,
    /// Torrents paused by the operator.
    Paused,
}

impl TorrentFilter {
    /// Wire identifier understood by the daemon.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Seeding => "seeding",
            Self::Downloading => "downloading",
            Self::Paused => "paused",
        }
    }
}

/// One torrent as seen by the daemon.
///
/// Paths are expressed in the daemon's view of the filesystem, which can differ
/// from the local view when the daemon runs in a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentRecord {
    /// Daemon-side identifier (info hash), diagnostics only.
    #[serde(default)]
    pub hash: Option<String>,
    /// Display name, informational only.
    pub name: String,
    /// Absolute path to the torrent's single file or top-level directory.
    pub content_path: String,
    /// Directory the torrent was saved under, when the daemon reports it.
    #[serde(default)]
    pub save_path: Option<String>,
}

impl TorrentRecord {
    /// Build a record without a save path or hash.
    #[must_use]
    pub fn new(name: impl Into<String>, content_path: impl Into<String>) -> Self {
        Self {
            hash: None,
            name: name.into(),
            content_path: content_path.into(),
            save_path: None,
        }
    }

    /// Attach the directory the torrent was saved under.
    #[must_use]
    pub fn with_save_path(mut self, save_path: impl Into<String>) -> Self {
        self.save_path = Some(save_path.into());
        self
    }

    /// Attach the daemon-side identifier.
    #[must_use]
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// Human-facing label used in diagnostics: the name, else the hash.
    #[must_use]
    pub fn label(&self) -> &str {
        if !self.name.trim().is_empty() {
            return &self.name;
        }
        self.hash.as_deref().unwrap_or("<unnamed>")
    }
}
