//! CLI configuration.
//!
//! A small TOML file with defaulted fields; every command reads the book
//! through it. Looked up at `./lyfr.toml` when no `--config` is given.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use lyfr::core::util::paths::{default_progress_file, default_shell_cache_dir, expand_tilde};
use lyfr::library::{ContentStore, Registry};
use lyfr::reader::JsonFileStore;
use serde::Deserialize;

fn default_content_dir() -> String {
    ".".to_string()
}

fn default_manifest() -> String {
    "book.toml".to_string()
}

fn default_listen() -> String {
    "127.0.0.1:4040".to_string()
}

fn default_cache_version() -> String {
    "lyfr-shell-v2".to_string()
}

/// Configuration shared by all commands.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory holding the chapter markdown files.
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    /// Book manifest path (sections, entries, anchors).
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Listen address for `lyfr serve`.
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Progress file override; platform data dir when unset.
    #[serde(default)]
    pub progress_file: Option<String>,

    /// Shell cache directory override; platform cache dir when unset.
    #[serde(default)]
    pub cache_dir: Option<String>,

    /// Versioned shell cache bucket name.
    #[serde(default = "default_cache_version")]
    pub cache_version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str("").expect("empty config must deserialize")
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist; otherwise `./lyfr.toml` is used when
    /// present, and built-in defaults when not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let fallback = PathBuf::from("lyfr.toml");
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load and validate the book registry.
    pub fn registry(&self) -> Result<Arc<Registry>> {
        let path = expand_tilde(&self.manifest);
        let registry = Registry::load(&path)
            .with_context(|| format!("loading book manifest {}", path.display()))?;
        Ok(Arc::new(registry))
    }

    /// Build the content store over the configured content directory.
    pub fn content_store(&self) -> Result<ContentStore> {
        Ok(ContentStore::new(
            expand_tilde(&self.content_dir),
            self.registry()?,
        ))
    }

    /// The progress store, configured or at the platform default.
    pub fn progress_store(&self) -> Result<JsonFileStore> {
        let path = match &self.progress_file {
            Some(p) => expand_tilde(p),
            None => default_progress_file().context("no platform data directory")?,
        };
        Ok(JsonFileStore::new(path))
    }

    /// The shell cache directory, configured or at the platform default.
    pub fn shell_cache_dir(&self) -> Result<PathBuf> {
        match &self.cache_dir {
            Some(p) => Ok(expand_tilde(p)),
            None => default_shell_cache_dir().context("no platform cache directory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.content_dir, ".");
        assert_eq!(config.manifest, "book.toml");
        assert_eq!(config.listen, "127.0.0.1:4040");
        assert_eq!(config.cache_version, "lyfr-shell-v2");
        assert!(config.progress_file.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: AppConfig =
            toml::from_str("content_dir = \"/srv/book\"\n").unwrap();
        assert_eq!(config.content_dir, "/srv/book");
        assert_eq!(config.listen, "127.0.0.1:4040");
    }

    #[test]
    fn test_missing_explicit_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }
}
