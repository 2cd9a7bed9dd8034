//! `lyfr serve` — run the HTTP reading surface.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use lyfr::server::AppState;

use crate::config::AppConfig;

pub async fn run(config: &AppConfig, listen: Option<String>) -> Result<()> {
    let listen = listen.unwrap_or_else(|| config.listen.clone());
    let addr: SocketAddr = listen
        .parse()
        .with_context(|| format!("invalid listen address {listen:?}"))?;

    let store = config.content_store()?;
    log::info!(
        "serving {} ({} chapters)",
        store.registry().book_title(),
        store.registry().slugs().len()
    );
    lyfr::server::serve(addr, AppState::new(store)).await?;
    Ok(())
}
