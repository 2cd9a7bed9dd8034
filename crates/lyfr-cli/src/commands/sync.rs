//! `lyfr sync` — mirror a running server into the offline shell cache.
//!
//! Runs the cache worker's full lifecycle: install the shell, prune stale
//! buckets, then fetch every chapter route through the worker so the cache
//! is refreshed where the network allows and retained where it does not.

use std::sync::Arc;

use anyhow::{Context, Result};
use lyfr::cache::{
    DirCacheStorage, FetchOutcome, FetchRequest, ReqwestFetcher, ServedFrom, ShellCacheConfig,
    ShellCacheWorker,
};
use lyfr::server::SHELL_PATHS;

use crate::config::AppConfig;

pub async fn run(config: &AppConfig, origin: Option<String>) -> Result<()> {
    let origin = origin.unwrap_or_else(|| format!("http://{}", config.listen));
    let registry = config.registry()?;
    let cache_dir = config.shell_cache_dir()?;

    let worker_config = ShellCacheConfig {
        version: config.cache_version.clone(),
        origin: origin.clone(),
        shell_paths: SHELL_PATHS.iter().map(|p| p.to_string()).collect(),
        root_path: "/".to_string(),
    };
    let storage = Arc::new(DirCacheStorage::new(&cache_dir));
    let fetcher = Arc::new(ReqwestFetcher::new(&origin)?);
    let mut worker = ShellCacheWorker::new(worker_config, storage, fetcher)?;

    worker
        .handle_install()
        .await
        .with_context(|| format!("installing shell from {origin}"))?;
    worker.handle_activate().await?;

    let mut fresh = 0usize;
    let mut cached = 0usize;
    let mut missed = 0usize;
    for slug in registry.slugs() {
        let request = FetchRequest::get(format!("{origin}/{slug}"));
        match worker.handle_fetch(&request).await {
            Ok(FetchOutcome::Served { from: ServedFrom::Network, .. }) => fresh += 1,
            Ok(FetchOutcome::Served { .. }) => cached += 1,
            Ok(FetchOutcome::PassThrough) => {}
            Err(err) => {
                log::warn!("could not mirror {slug}: {err}");
                missed += 1;
            }
        }
    }
    worker.quiesce().await;

    println!(
        "synced {} into {} at {}: {fresh} fresh, {cached} from cache, {missed} missed",
        registry.book_title(),
        worker.version(),
        cache_dir.display(),
    );
    Ok(())
}
