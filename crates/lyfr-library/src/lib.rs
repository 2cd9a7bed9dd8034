//! The Lyfr book model.
//!
//! A *book* is a static navigation registry over a directory of markdown
//! chapter files:
//!
//! - [`registry`]: the ordered catalogue of sections → entries → optional
//!   sub-anchors, declared in a TOML manifest and immutable after load.
//!   Provides slug lookup, the first slug, and the canonical ordered slug
//!   universe.
//! - [`store`]: resolves a slug to its backing markdown file and assembles
//!   the renderable [`Chapter`] view (title, HTML, outline, reading time).
//!
//! Unknown slugs and missing backing files collapse into the single
//! not-found outcome; callers never learn which of the two occurred.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod registry;
pub mod store;

pub use lyfr_core::{Error, Result};
pub use registry::{MenuEntry, MenuSection, Registry, SubAnchor};
pub use store::{Chapter, ContentStore};
