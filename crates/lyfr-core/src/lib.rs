//! Lyfr Core — shared types, errors, and utilities.
//!
//! This crate provides the foundational types used across all Lyfr crates.
//! It has no internal Lyfr dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`util`]: Id and path utilities

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};

// Convenience re-exports from util
pub use util::ids::{heading_id, normalize_id, HeadingIdAllocator};
pub use util::paths::expand_tilde;
