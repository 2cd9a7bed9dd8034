//! The navigation registry.
//!
//! A registry is built once from a TOML manifest and never mutated. It is
//! the canonical universe of slugs: progress totals, sidebar rendering, and
//! the landing redirect all derive from it.
//!
//! # Manifest format
//!
//! ```toml
//! title = "Frontend Interview Book"
//!
//! [[section]]
//! title = "QUICK REFERENCE"
//!
//! [[section.entry]]
//! title = "Quick Reference"
//! slug = "part-a"
//! file = "PART_A_QUICK_REFERENCE.md"
//!
//! [[section.entry.anchor]]
//! title = "Top 50 Most Asked Questions"
//! id = "top-50-most-asked-questions"
//! ```

use std::collections::HashMap;
use std::path::Path;

use lyfr_core::{normalize_id, Error, Result};
use serde::{Deserialize, Serialize};

/// A deep-link target inside a chapter, shown as a sidebar sub-item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubAnchor {
    /// Display title.
    pub title: String,
    /// Heading anchor id, linked as `/{slug}#{id}`.
    pub id: String,
}

/// One chapter entry in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Display title.
    pub title: String,
    /// Unique URL-safe key for this chapter.
    pub slug: String,
    /// Backing markdown file, relative to the content root.
    pub file: String,
    /// Ordered sub-anchors, possibly empty.
    #[serde(default, rename = "anchor")]
    pub anchors: Vec<SubAnchor>,
}

/// A presentational grouping of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSection {
    /// Section heading shown in the sidebar.
    pub title: String,
    /// Entries in declaration order.
    #[serde(default, rename = "entry")]
    pub entries: Vec<MenuEntry>,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "section")]
    sections: Vec<MenuSection>,
}

/// The static, ordered catalogue of a book.
///
/// Slug lookup is O(1) via an index built at load; the flattened slug list
/// preserves declaration order and is the canonical universe for progress
/// totals.
#[derive(Debug, Clone)]
pub struct Registry {
    book_title: String,
    sections: Vec<MenuSection>,
    slugs: Vec<String>,
    index: HashMap<String, (usize, usize)>,
}

impl Registry {
    /// Parse and validate a TOML manifest.
    ///
    /// Fails when the manifest has no entries, declares a slug that is not
    /// normalized kebab-case, or declares the same slug twice.
    pub fn from_toml(text: &str) -> Result<Self> {
        let manifest: Manifest =
            toml::from_str(text).map_err(|e| Error::Manifest(e.to_string()))?;
        Self::from_sections(
            manifest.title.unwrap_or_else(|| "Untitled Book".to_string()),
            manifest.sections,
        )
    }

    /// Load a manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Build a registry from already-constructed sections.
    pub fn from_sections(book_title: String, sections: Vec<MenuSection>) -> Result<Self> {
        let mut slugs = Vec::new();
        let mut index = HashMap::new();

        for (si, section) in sections.iter().enumerate() {
            for (ei, entry) in section.entries.iter().enumerate() {
                if entry.slug != normalize_id(&entry.slug) {
                    return Err(Error::Manifest(format!(
                        "slug is not normalized kebab-case: {:?}",
                        entry.slug
                    )));
                }
                if index.insert(entry.slug.clone(), (si, ei)).is_some() {
                    return Err(Error::Manifest(format!("duplicate slug: {}", entry.slug)));
                }
                slugs.push(entry.slug.clone());
            }
        }

        if slugs.is_empty() {
            return Err(Error::Manifest("manifest declares no entries".to_string()));
        }

        log::debug!(
            "registry loaded: {} sections, {} entries",
            sections.len(),
            slugs.len()
        );

        Ok(Self {
            book_title,
            sections,
            slugs,
            index,
        })
    }

    /// The book's display title.
    pub fn book_title(&self) -> &str {
        &self.book_title
    }

    /// Look up an entry by slug.
    pub fn entry(&self, slug: &str) -> Option<&MenuEntry> {
        self.index
            .get(slug)
            .map(|&(si, ei)| &self.sections[si].entries[ei])
    }

    /// The first entry of the first section: the landing redirect target and
    /// the not-found fallback target.
    pub fn first_slug(&self) -> &str {
        &self.slugs[0]
    }

    /// The full ordered slug list — the canonical universe.
    pub fn slugs(&self) -> &[String] {
        &self.slugs
    }

    /// Sections in declaration order, for sidebar rendering.
    pub fn sections(&self) -> &[MenuSection] {
        &self.sections
    }

    /// Nearest known slug to an unknown one, by Jaro-Winkler similarity.
    ///
    /// Returns `None` when nothing is reasonably close.
    pub fn suggest(&self, unknown: &str) -> Option<&str> {
        let unknown = normalize_id(unknown);
        self.slugs
            .iter()
            .map(|s| (strsim::jaro_winkler(&unknown, s), s))
            .filter(|(score, _)| *score >= 0.72)
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, s)| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
title = "Test Book"

[[section]]
title = "PART ONE"

[[section.entry]]
title = "Alpha"
slug = "part-a"
file = "alpha.md"

[[section.entry.anchor]]
title = "First Steps"
id = "first-steps"

[[section]]
title = "PART TWO"

[[section.entry]]
title = "Bravo"
slug = "part-b"
file = "bravo.md"

[[section.entry]]
title = "Charlie"
slug = "part-c"
file = "charlie.md"
"#;

    #[test]
    fn test_manifest_round_trip() {
        let registry = Registry::from_toml(MANIFEST).unwrap();
        assert_eq!(registry.book_title(), "Test Book");
        assert_eq!(registry.slugs(), ["part-a", "part-b", "part-c"]);
        assert_eq!(registry.first_slug(), "part-a");
        assert_eq!(registry.sections().len(), 2);
    }

    #[test]
    fn test_entry_lookup() {
        let registry = Registry::from_toml(MANIFEST).unwrap();
        let entry = registry.entry("part-a").unwrap();
        assert_eq!(entry.file, "alpha.md");
        assert_eq!(entry.anchors.len(), 1);
        assert_eq!(entry.anchors[0].id, "first-steps");
        assert!(registry.entry("part-z").is_none());
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let manifest = r#"
[[section]]
title = "S"

[[section.entry]]
title = "A"
slug = "part-a"
file = "a.md"

[[section.entry]]
title = "B"
slug = "part-a"
file = "b.md"
"#;
        let err = Registry::from_toml(manifest).unwrap_err();
        assert!(matches!(err, Error::Manifest(_)));
    }

    #[test]
    fn test_unnormalized_slug_rejected() {
        let manifest = r#"
[[section]]
title = "S"

[[section.entry]]
title = "A"
slug = "Part A"
file = "a.md"
"#;
        assert!(Registry::from_toml(manifest).is_err());
    }

    #[test]
    fn test_empty_manifest_rejected() {
        assert!(Registry::from_toml("").is_err());
        assert!(Registry::from_toml("[[section]]\ntitle = \"S\"\n").is_err());
    }

    #[test]
    fn test_suggest_close_slug() {
        let registry = Registry::from_toml(MANIFEST).unwrap();
        assert_eq!(registry.suggest("part-aa"), Some("part-a"));
        assert_eq!(registry.suggest("zzzzzz"), None);
    }
}
