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

//! Daemon-agnostic torrent records and the listing interface consumed by the sweep.
//!
//! Layout: `model/` (records and filters), `service/` (the `TorrentLister`
//! trait implemented by daemon adapters), `error.rs` (error taxonomy).

pub mod error;
pub mod model;
pub mod service;

pub use error::{TorrentError, TorrentResult};
pub use model::{TorrentFilter, TorrentRecord};
pub use service::TorrentLister;
