//! Heading outline extraction.
//!
//! The outline is the ordered list of h2–h4 headings in a document, each
//! with a generated anchor id. It drives the scroll-spy target list, the
//! sidebar sub-anchor links, and `lyfr toc`.
//!
//! # Example
//!
//! ```rust
//! use lyfr_content::markdown::outline::extract_outline;
//!
//! let content = "# Title\n\n## Closures & Scope\n\ntext\n\n### Lexical Environment\n";
//! let outline = extract_outline(content);
//!
//! assert_eq!(outline.len(), 2);
//! assert_eq!(outline[0].id, "closures--scope");
//! assert_eq!(outline[1].level, 3);
//! ```

use lyfr_core::HeadingIdAllocator;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::Serialize;

/// One heading in a document outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Heading depth, 2–4.
    pub level: u8,
    /// Generated anchor id, unique within the document.
    pub id: String,
    /// Heading text with inline formatting stripped.
    pub text: String,
}

/// Numeric depth of a pulldown heading level.
pub(crate) fn depth_of(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Whether a heading level participates in the outline (h2–h4).
pub(crate) fn in_outline(level: HeadingLevel) -> bool {
    (2..=4).contains(&depth_of(level))
}

/// Extract the h2–h4 outline of a markdown document.
///
/// Inline formatting (bold, italic, links, inline code markers) is stripped
/// from heading text. Anchor ids are allocated in document order with a
/// fresh [`HeadingIdAllocator`], so repeated heading texts get `-1`, `-2`
/// suffixes.
pub fn extract_outline(content: &str) -> Vec<Heading> {
    let mut alloc = HeadingIdAllocator::new();
    let mut outline = Vec::new();

    let mut current: Option<(HeadingLevel, String)> = None;
    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Heading { level, .. }) if in_outline(level) => {
                current = Some((level, String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = current.take() {
                    let text = text.trim().to_string();
                    if !text.is_empty() {
                        outline.push(Heading {
                            level: depth_of(level),
                            id: alloc.allocate(&text),
                            text,
                        });
                    }
                }
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&t);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, text)) = current.as_mut() {
                    text.push(' ');
                }
            }
            _ => {}
        }
    }

    outline
}
