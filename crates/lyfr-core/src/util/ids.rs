//! Id normalization and heading-anchor generation.
//!
//! Two id forms exist in Lyfr:
//!
//! - Slugs: kebab-case identifiers declared in the book manifest, one per
//!   chapter. [`normalize_id`] is used to validate and normalize these.
//! - Heading anchors: ids generated from heading text at render time, the
//!   targets of sub-anchor links and the scroll-spy.
//!   [`heading_id`] produces them; [`HeadingIdAllocator`] deduplicates
//!   repeats within one document.

use std::collections::HashMap;

/// Normalize an identifier to lowercase kebab-case.
///
/// Trims whitespace, lowercases, converts underscores to hyphens, and
/// collapses runs of whitespace into single hyphens.
///
/// # Examples
///
/// ```
/// use lyfr_core::util::ids::normalize_id;
///
/// assert_eq!(normalize_id("Part A"), "part-a");
/// assert_eq!(normalize_id("quick_reference"), "quick-reference");
/// assert_eq!(normalize_id("  Mixed   Case  "), "mixed-case");
/// ```
pub fn normalize_id(id: &str) -> String {
    id.trim()
        .to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("-")
}

/// Generate a heading anchor id from heading text.
///
/// Lowercases, drops every character that is not alphanumeric, a space, or
/// a hyphen, then maps each space to a hyphen. Unlike [`normalize_id`],
/// whitespace runs are *not* collapsed: removed punctuation leaves its
/// surrounding spaces behind, so `"Event Loop & Async JavaScript"` becomes
/// `"event-loop--async-javascript"`, matching the anchor form used in book
/// manifests.
///
/// # Examples
///
/// ```
/// use lyfr_core::util::ids::heading_id;
///
/// assert_eq!(heading_id("Closures & Scope"), "closures--scope");
/// assert_eq!(heading_id("Web Accessibility (A11y)"), "web-accessibility-a11y");
/// assert_eq!(heading_id("Webpack, Vite, Rollup"), "webpack-vite-rollup");
/// ```
pub fn heading_id(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-')
        .map(|c| if c == ' ' { '-' } else { c })
        .collect()
}

/// Allocates unique heading ids within a single document.
///
/// The first occurrence of a heading text gets its plain [`heading_id`];
/// repeats get `-1`, `-2`, ... suffixes in document order. One allocator is
/// used per rendered document so the outline and the rendered HTML agree on
/// every anchor.
#[derive(Debug, Default)]
pub struct HeadingIdAllocator {
    seen: HashMap<String, usize>,
}

impl HeadingIdAllocator {
    /// Create an empty allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the anchor id for the next occurrence of `text`.
    pub fn allocate(&mut self, text: &str) -> String {
        let base = heading_id(text);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let id = if *count == 0 {
            base.clone()
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // normalize_id tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_normalize_id_simple() {
        assert_eq!(normalize_id("part-a"), "part-a");
    }

    #[test]
    fn test_normalize_id_with_spaces() {
        assert_eq!(normalize_id("Part A"), "part-a");
    }

    #[test]
    fn test_normalize_id_with_underscores() {
        assert_eq!(normalize_id("quick_reference"), "quick-reference");
    }

    #[test]
    fn test_normalize_id_empty() {
        assert_eq!(normalize_id(""), "");
        assert_eq!(normalize_id("   "), "");
    }

    // -------------------------------------------------------------------------
    // heading_id tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_heading_id_plain() {
        assert_eq!(heading_id("This Keyword"), "this-keyword");
    }

    #[test]
    fn test_heading_id_ampersand_leaves_double_hyphen() {
        assert_eq!(
            heading_id("Event Loop & Async JavaScript"),
            "event-loop--async-javascript"
        );
    }

    #[test]
    fn test_heading_id_strips_punctuation() {
        assert_eq!(heading_id("Top 50 Most Asked Questions"), "top-50-most-asked-questions");
        assert_eq!(heading_id("Webpack, Vite, Rollup"), "webpack-vite-rollup");
    }

    #[test]
    fn test_heading_id_keeps_existing_hyphens() {
        assert_eq!(heading_id("ii-V-I"), "ii-v-i");
    }

    // -------------------------------------------------------------------------
    // HeadingIdAllocator tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_allocator_dedups_repeats() {
        let mut alloc = HeadingIdAllocator::new();
        assert_eq!(alloc.allocate("Setup"), "setup");
        assert_eq!(alloc.allocate("Setup"), "setup-1");
        assert_eq!(alloc.allocate("Setup"), "setup-2");
        assert_eq!(alloc.allocate("Teardown"), "teardown");
    }
}
