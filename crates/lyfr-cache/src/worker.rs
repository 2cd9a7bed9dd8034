//! The shell cache worker protocol.
//!
//! One handler per lifecycle event, one source of truth for the current
//! cache version. See the crate docs for the event semantics; the
//! invariants that matter:
//!
//! - a cache write never delays or fails the response it was cloned from
//!   (write-behind via spawned tasks, drained by [`ShellCacheWorker::quiesce`])
//! - non-GET and cross-origin requests are never intercepted
//! - only basic 200 responses are written to the cache

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use reqwest::Url;
use tokio::sync::Notify;

use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::response::CachedResponse;
use crate::storage::CacheStorage;

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct ShellCacheConfig {
    /// Versioned bucket name, e.g. `lyfr-shell-v2`. Changing the version
    /// makes activation discard every older bucket.
    pub version: String,
    /// Origin treated as same-origin, e.g. `http://127.0.0.1:4040`.
    pub origin: String,
    /// Paths pre-populated at install.
    pub shell_paths: Vec<String>,
    /// Path of the offline fallback document.
    pub root_path: String,
}

impl ShellCacheConfig {
    /// Configuration with the standard shell enumeration.
    pub fn new(version: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            origin: origin.into(),
            shell_paths: vec![
                "/".to_string(),
                "/manifest.webmanifest".to_string(),
                "/icon.svg".to_string(),
            ],
            root_path: "/".to_string(),
        }
    }
}

/// Lifecycle phase of the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    /// Constructed; nothing cached yet.
    Idle,
    /// Shell assets cached; stale buckets not yet pruned.
    Installed,
    /// Fully active.
    Active,
}

/// A request presented to the fetch handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// HTTP method.
    pub method: String,
    /// Absolute URL.
    pub url: String,
}

impl FetchRequest {
    /// A GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
        }
    }
}

/// Where a served response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServedFrom {
    /// Live network response.
    Network,
    /// Cached entry for the requested URL.
    Cache,
    /// Cached root document, the last-resort offline fallback.
    ShellRoot,
}

/// Result of the fetch handler.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The worker does not intercept this request (non-GET, cross-origin,
    /// or non-http scheme).
    PassThrough,
    /// The worker served a response.
    Served {
        /// Source of the response.
        from: ServedFrom,
        /// The response itself.
        response: CachedResponse,
    },
}

struct PendingWrites {
    count: AtomicUsize,
    notify: Notify,
}

/// The worker: versioned shell cache with network-first fetch.
pub struct ShellCacheWorker {
    config: ShellCacheConfig,
    origin: Url,
    storage: Arc<dyn CacheStorage>,
    fetcher: Arc<dyn Fetcher>,
    phase: WorkerPhase,
    pending: Arc<PendingWrites>,
}

impl ShellCacheWorker {
    /// Build a worker. Fails when the configured origin does not parse.
    pub fn new(
        config: ShellCacheConfig,
        storage: Arc<dyn CacheStorage>,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self> {
        let origin = Url::parse(&config.origin).map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self {
            config,
            origin,
            storage,
            fetcher,
            phase: WorkerPhase::Idle,
            pending: Arc::new(PendingWrites {
                count: AtomicUsize::new(0),
                notify: Notify::new(),
            }),
        })
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> WorkerPhase {
        self.phase
    }

    /// The versioned bucket name in use.
    pub fn version(&self) -> &str {
        &self.config.version
    }

    /// **install**: pre-populate the current bucket with every shell path.
    ///
    /// Any shell asset failing to fetch or store fails the install and the
    /// worker stays idle, like a failed `cache.addAll`.
    pub async fn handle_install(&mut self) -> Result<()> {
        for path in &self.config.shell_paths {
            let url = self.absolute(path);
            let response = self.fetcher.fetch(&url).await?;
            if !response.is_cacheable() {
                return Err(Error::Network(format!(
                    "shell asset {path} answered {}",
                    response.status
                )));
            }
            self.storage
                .put(&self.config.version, path, &response)
                .await?;
        }
        self.phase = WorkerPhase::Installed;
        log::info!(
            "shell cache installed: {} assets in {}",
            self.config.shell_paths.len(),
            self.config.version
        );
        Ok(())
    }

    /// **activate**: delete every bucket whose name is not the current
    /// version.
    pub async fn handle_activate(&mut self) -> Result<()> {
        for bucket in self.storage.list_buckets().await? {
            if bucket != self.config.version {
                log::info!("pruning stale cache bucket {bucket}");
                self.storage.delete_bucket(&bucket).await?;
            }
        }
        self.phase = WorkerPhase::Active;
        Ok(())
    }

    /// **fetch**: network first, cache fallback, cached-root last resort.
    pub async fn handle_fetch(&self, request: &FetchRequest) -> Result<FetchOutcome> {
        if !request.method.eq_ignore_ascii_case("GET") {
            return Ok(FetchOutcome::PassThrough);
        }
        let Ok(url) = Url::parse(&request.url) else {
            return Ok(FetchOutcome::PassThrough);
        };
        if url.origin() != self.origin.origin() {
            return Ok(FetchOutcome::PassThrough);
        }

        let key = cache_key(&url);
        match self.fetcher.fetch(&request.url).await {
            Ok(response) => {
                if response.is_cacheable() {
                    self.spawn_write(key, response.clone());
                }
                Ok(FetchOutcome::Served {
                    from: ServedFrom::Network,
                    response,
                })
            }
            Err(err) => {
                log::debug!("network failed for {key}, trying cache: {err}");
                if let Some(response) = self.storage.get(&self.config.version, &key).await? {
                    return Ok(FetchOutcome::Served {
                        from: ServedFrom::Cache,
                        response,
                    });
                }
                if let Some(response) = self
                    .storage
                    .get(&self.config.version, &self.config.root_path)
                    .await?
                {
                    return Ok(FetchOutcome::Served {
                        from: ServedFrom::ShellRoot,
                        response,
                    });
                }
                Err(Error::Offline(request.url.clone()))
            }
        }
    }

    /// Wait for all in-flight write-behind cache refreshes to finish.
    pub async fn quiesce(&self) {
        loop {
            let notified = self.pending.notify.notified();
            tokio::pin!(notified);
            // Register before the count check so a completion between the
            // check and the await cannot be missed.
            notified.as_mut().enable();
            if self.pending.count.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }

    fn absolute(&self, path: &str) -> String {
        format!("{}{path}", self.config.origin.trim_end_matches('/'))
    }

    fn spawn_write(&self, key: String, response: CachedResponse) {
        let storage = Arc::clone(&self.storage);
        let bucket = self.config.version.clone();
        let pending = Arc::clone(&self.pending);
        pending.count.fetch_add(1, Ordering::SeqCst);
        tokio::spawn(async move {
            if let Err(err) = storage.put(&bucket, &key, &response).await {
                log::warn!("cache refresh failed for {key}: {err}");
            }
            if pending.count.fetch_sub(1, Ordering::SeqCst) == 1 {
                pending.notify.notify_waiters();
            }
        });
    }
}

/// Cache key for a same-origin URL: path plus query.
fn cache_key(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    }
}
