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

//! Logging primitives shared across the seedsweep workspace.
//!
//! Layout: `init.rs` (subscriber installation and log format selection),
//! `context.rs` (the span every sweep runs inside).

pub mod context;
pub mod init;

pub use context::sweep_span;
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, VERBOSE_LOG_LEVEL, init_logging};
