//! Error types for the shell cache.

use thiserror::Error;

/// Result type alias for shell-cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the shell cache.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The network failed and neither the requested entry nor the root
    /// document is cached.
    #[error("offline and no cached fallback for {0}")]
    Offline(String),

    /// The worker configuration is unusable (e.g. an unparseable origin).
    #[error("invalid cache configuration: {0}")]
    Config(String),

    /// Cache storage failed.
    #[error("cache storage: {0}")]
    Storage(String),

    /// The network request failed outright.
    #[error("network: {0}")]
    Network(String),

    /// Underlying filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
