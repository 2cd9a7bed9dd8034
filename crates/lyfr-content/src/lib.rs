//! Markdown processing for the Lyfr reading system.
//!
//! This crate provides the content-processing utilities used by the book
//! library and the HTTP surface. It has no knowledge of slugs, registries,
//! or storage — it turns raw markdown into:
//!
//! - a heading outline (h2–h4) with generated anchor ids ([`markdown::outline`])
//! - rendered HTML whose headings carry those same ids ([`markdown::render`])
//! - an estimated reading time in minutes ([`readtime`])
//!
//! Anchor ids are allocated once per document, so the outline and the
//! rendered HTML always agree. See [`lyfr_core::HeadingIdAllocator`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod markdown;
pub mod readtime;

pub use markdown::outline::{extract_outline, Heading};
pub use markdown::render::render_html;
pub use readtime::{estimate_minutes, WORDS_PER_MINUTE};

// Re-export HeadingLevel for convenience
pub use pulldown_cmark::HeadingLevel;
