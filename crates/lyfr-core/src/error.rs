//! Error types for the Lyfr reading system.

use thiserror::Error;

/// Result type alias for Lyfr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur across the Lyfr crates.
///
/// The taxonomy is deliberately small. Unknown slugs and missing backing
/// files collapse into [`Error::ChapterNotFound`]; callers are not told
/// which of the two occurred.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The slug is unknown to the registry, or its backing file is missing
    /// or unreadable.
    #[error("chapter not found: {0}")]
    ChapterNotFound(String),

    /// The book manifest failed to load or validate.
    #[error("invalid book manifest: {0}")]
    Manifest(String),

    /// Reader-state storage failed to load or persist.
    #[error("reader storage: {0}")]
    Storage(String),

    /// Underlying filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` for the collapsed not-found outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ChapterNotFound(_))
    }
}
