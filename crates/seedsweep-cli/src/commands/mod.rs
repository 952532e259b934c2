//! Command handlers.

pub(crate) mod sweep;
