//! Route handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::pages;
use crate::shell;
use crate::AppState;

/// `GET /` — unconditional redirect to the first chapter.
pub async fn root(State(state): State<Arc<AppState>>) -> Redirect {
    let first = state.store.registry().first_slug();
    Redirect::temporary(&format!("/{first}"))
}

/// `GET /{slug}` — the chapter page, or the not-found page.
pub async fn chapter(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    let registry = state.store.registry();
    match state.store.load(&slug).await {
        Ok(chapter) => Html(pages::chapter_page(registry, &chapter)).into_response(),
        Err(err) if err.is_not_found() => not_found_response(&state, &slug),
        Err(err) => {
            tracing::error!("failed to load chapter {slug}: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(pages::not_found_page(registry, &slug)),
            )
                .into_response()
        }
    }
}

/// Any unmatched path renders the not-found page.
pub async fn fallback(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    not_found_response(&state, uri.path().trim_start_matches('/'))
}

fn not_found_response(state: &AppState, slug: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(pages::not_found_page(state.store.registry(), slug)),
    )
        .into_response()
}

/// `GET /healthz`.
pub async fn healthz() -> &'static str {
    "ok"
}

/// `GET /manifest.webmanifest`.
pub async fn manifest(State(state): State<Arc<AppState>>) -> Response {
    let body = shell::manifest_json(state.store.registry().book_title());
    (
        [(header::CONTENT_TYPE, "application/manifest+json")],
        body,
    )
        .into_response()
}

/// `GET /icon.svg`.
pub async fn icon() -> Response {
    ([(header::CONTENT_TYPE, "image/svg+xml")], shell::ICON_SVG).into_response()
}
