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

//! Immutable run configuration for a sweep.
//!
//! Layout: `model.rs` (raw inputs and the validated `SweepConfig`),
//! `validate.rs` (field validation and URL assembly), `error.rs`.

pub mod error;
pub mod model;
mod validate;

pub use error::{ConfigError, ConfigResult};
pub use model::{
    DEFAULT_DIRECTORY, DEFAULT_HOSTNAME, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, DaemonConfig,
    DaemonCredentials, SweepConfig, SweepInputs,
};
