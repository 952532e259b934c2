#![forbid(unsafe_code)]
#![deny(
    dead_code,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! qBittorrent Web API (v2) adapter for the torrent listing interface.
//!
//! Layout:
//! - `client.rs`: session login, torrent queries, and error classification
//! - `model.rs`: wire DTOs and their mapping onto `TorrentRecord`

pub mod client;
pub mod model;

pub use client::{QbitClient, QbitCredentials};
pub use model::QbitTorrent;
