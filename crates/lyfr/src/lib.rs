//! Lyfr markdown book reading system — umbrella crate.
//!
//! This crate re-exports all Lyfr components for convenience.
//! Use feature flags to enable specific functionality.

pub use lyfr_content as content;
pub use lyfr_core as core;
pub use lyfr_library as library;

#[cfg(feature = "reader")]
pub use lyfr_reader as reader;

#[cfg(feature = "cache")]
pub use lyfr_cache as cache;

#[cfg(feature = "server")]
pub use lyfr_server as server;
