//! Axum web server for the expert form.
//!
//! ## URL layout
//!
//! ```text
//! GET  /               → form page
//! POST /ask            → form page with the answer (form-encoded persona, text)
//! POST /api/ask        → JSON {persona, text} → {persona, kind, text}
//! GET  /api/personas   → selectable personas
//! GET  /api/health     → provider / credential status
//! GET  /favicon.ico    → 204
//! ```

mod api;
mod ui;

use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::AppError;
use crate::orchestrator::Orchestrator;

/// Router state injected into every handler. Cheap to clone.
#[derive(Clone)]
pub(crate) struct AppState {
    pub app_name: Arc<str>,
    pub orchestrator: Arc<Orchestrator>,
}

/// Bind `bind_addr` and serve until `shutdown` is cancelled.
pub async fn serve(
    bind_addr: &str,
    app_name: &str,
    orchestrator: Arc<Orchestrator>,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let state = AppState { app_name: Arc::from(app_name), orchestrator };

    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| AppError::Server(format!("bind failed on {bind_addr}: {e}")))?;

    info!(%bind_addr, "expert form listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Server(format!("axum server error: {e}")))?;

    info!("expert form shut down");
    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/",              get(ui::index))
        .route("/ask",           post(ui::ask))
        .route("/api/ask",       post(api::ask))
        .route("/api/personas",  get(api::personas))
        .route("/api/health",    get(api::health))
        .route("/favicon.ico",   get(|| async { StatusCode::NO_CONTENT }))
        .with_state(state)
}
