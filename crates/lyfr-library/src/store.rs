//! Content resolution: slug → markdown file → assembled chapter.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use lyfr_content::{estimate_minutes, extract_outline, render_html, Heading};
use lyfr_core::{Error, Result};
use serde::Serialize;

use crate::registry::Registry;

/// A chapter assembled for display.
#[derive(Debug, Clone, Serialize)]
pub struct Chapter {
    /// Registry slug.
    pub slug: String,
    /// Display title from the registry entry.
    pub title: String,
    /// Rendered HTML body with anchored headings.
    pub html: String,
    /// Ordered h2–h4 outline of the body.
    pub outline: Vec<Heading>,
    /// Estimated reading time in minutes, at least 1.
    pub minutes: usize,
}

/// Resolves slugs against the registry and reads backing markdown files.
///
/// Cheap to clone; the registry is shared.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
    registry: Arc<Registry>,
}

impl ContentStore {
    /// Create a store over a content root directory.
    pub fn new(root: impl Into<PathBuf>, registry: Arc<Registry>) -> Self {
        Self {
            root: root.into(),
            registry,
        }
    }

    /// The registry this store resolves against.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The content root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the raw markdown for a slug.
    ///
    /// An unknown slug and a missing or unreadable backing file both yield
    /// [`Error::ChapterNotFound`]; the distinction is logged but not
    /// surfaced.
    pub async fn read_raw(&self, slug: &str) -> Result<String> {
        let entry = self
            .registry
            .entry(slug)
            .ok_or_else(|| Error::ChapterNotFound(slug.to_string()))?;

        let path = self.root.join(&entry.file);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(err) => {
                log::debug!("backing file unreadable for {slug} ({path:?}): {err}");
                Err(Error::ChapterNotFound(slug.to_string()))
            }
        }
    }

    /// Resolve and assemble a chapter: render HTML, extract the outline,
    /// and estimate reading time.
    pub async fn load(&self, slug: &str) -> Result<Chapter> {
        let entry = self
            .registry
            .entry(slug)
            .ok_or_else(|| Error::ChapterNotFound(slug.to_string()))?;
        let title = entry.title.clone();
        let raw = self.read_raw(slug).await?;

        Ok(Chapter {
            slug: slug.to_string(),
            title,
            html: render_html(&raw),
            outline: extract_outline(&raw),
            minutes: estimate_minutes(&raw),
        })
    }
}
