//! HTTP reading surface for Lyfr books.
//!
//! Routes:
//!
//! - `GET /` — temporary redirect to the first chapter
//! - `GET /{slug}` — rendered chapter page; unknown slugs get the
//!   not-found page (status 404) linking the first chapter
//! - `GET /manifest.webmanifest`, `GET /icon.svg` — the shell assets the
//!   offline cache enumerates
//! - `GET /healthz` — liveness
//!
//! Pages are rendered server-side from the registry and content store; the
//! server carries no mutable state.

#![forbid(unsafe_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use lyfr_library::ContentStore;
use tower_http::trace::TraceLayer;

mod handlers;
mod pages;
pub mod shell;

pub use shell::SHELL_PATHS;

/// Shared, immutable application state.
#[derive(Clone)]
pub struct AppState {
    /// Slug resolution and chapter assembly.
    pub store: ContentStore,
}

impl AppState {
    /// Build state over a content store.
    pub fn new(store: ContentStore) -> Self {
        Self { store }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/manifest.webmanifest", get(handlers::manifest))
        .route("/icon.svg", get(handlers::icon))
        .route("/{slug}", get(handlers::chapter))
        .fallback(handlers::fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind and serve until the task is cancelled.
pub async fn serve(addr: SocketAddr, state: AppState) -> lyfr_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("lyfr server listening on http://{addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
