//! Network fetch capability.

use async_trait::async_trait;
use reqwest::Url;

use crate::error::{Error, Result};
use crate::response::{CachedResponse, ResponseKind};

/// Capability: perform one GET and return the cacheable representation.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a URL. Transport failure is an error; HTTP error statuses are
    /// returned as responses.
    async fn fetch(&self, url: &str) -> Result<CachedResponse>;
}

/// Reqwest-backed fetcher.
///
/// Responses whose final URL shares the configured origin are classified
/// [`ResponseKind::Basic`]; anything else (including cross-origin
/// redirects) is [`ResponseKind::Opaque`] and therefore never cached.
pub struct ReqwestFetcher {
    client: reqwest::Client,
    origin: Url,
}

impl ReqwestFetcher {
    /// Build a fetcher that treats `origin` (e.g. `http://127.0.0.1:4040`)
    /// as same-origin.
    pub fn new(origin: &str) -> Result<Self> {
        let origin = Url::parse(origin).map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self {
            client: reqwest::Client::new(),
            origin,
        })
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<CachedResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let kind = if response.url().origin() == self.origin.origin() {
            ResponseKind::Basic
        } else {
            ResponseKind::Opaque
        };
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Network(e.to_string()))?
            .to_vec();

        Ok(CachedResponse::new(status, kind, content_type, body))
    }
}
