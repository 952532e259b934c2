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
#![allow(clippy::redundant_pub_crate)]

//! Command-line entrypoint that sweeps unowned entries out of a torrent directory.
//!
//! Layout:
//! - `cli.rs`: argument parsing, logging setup, and exit code mapping
//! - `commands/`: the sweep pass
//! - `client.rs`: daemon client wiring and CLI errors
//! - `output.rs`: audit report rendering
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod commands;
pub(crate) mod output;

pub use cli::run;
