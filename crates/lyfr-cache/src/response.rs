//! The cacheable response representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification of a fetched response for caching purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// Same-origin, fully readable — eligible for caching.
    Basic,
    /// Cross-origin or otherwise unreadable — never cached.
    Opaque,
}

/// A response as held by the cache (and as returned by fetchers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedResponse {
    /// HTTP status code.
    pub status: u16,
    /// Caching classification.
    pub kind: ResponseKind,
    /// `Content-Type` header, when present.
    pub content_type: Option<String>,
    /// Response body bytes.
    pub body: Vec<u8>,
    /// When this response was fetched from the network.
    pub fetched_at: DateTime<Utc>,
}

impl CachedResponse {
    /// Build a response fetched now.
    pub fn new(
        status: u16,
        kind: ResponseKind,
        content_type: Option<String>,
        body: Vec<u8>,
    ) -> Self {
        Self {
            status,
            kind,
            content_type,
            body,
            fetched_at: Utc::now(),
        }
    }

    /// Whether this response may be written to the cache: a basic 200.
    pub fn is_cacheable(&self) -> bool {
        self.status == 200 && self.kind == ResponseKind::Basic
    }

    /// Body interpreted as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_basic_200_is_cacheable() {
        let ok = CachedResponse::new(200, ResponseKind::Basic, None, Vec::new());
        assert!(ok.is_cacheable());

        let not_found = CachedResponse::new(404, ResponseKind::Basic, None, Vec::new());
        assert!(!not_found.is_cacheable());

        let opaque = CachedResponse::new(200, ResponseKind::Opaque, None, Vec::new());
        assert!(!opaque.is_cacheable());
    }

    #[test]
    fn test_text_is_lossy() {
        let resp = CachedResponse::new(200, ResponseKind::Basic, None, vec![0xff, b'o', b'k']);
        assert!(resp.text().ends_with("ok"));
    }
}
