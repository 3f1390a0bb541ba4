//! JSON handlers under `/api/`.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use crate::orchestrator::Reply;
use crate::persona::Persona;

#[derive(Deserialize)]
pub(super) struct AskRequest {
    #[serde(default)]
    persona: String,
    #[serde(default)]
    text: String,
}

/// POST /api/ask
pub(super) async fn ask(State(state): State<AppState>, Json(req): Json<AskRequest>) -> Response {
    let persona = Persona::from_label(&req.persona);
    let reply = state.orchestrator.ask(&req.persona, &req.text).await;

    let status = match reply {
        Reply::MissingCredential => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    };
    let body = json!({
        "persona": persona.slug(),
        "kind": reply.kind(),
        "text": reply.text(),
    });
    (status, Json(body)).into_response()
}

/// GET /api/personas
pub(super) async fn personas() -> Json<serde_json::Value> {
    let list: Vec<_> = Persona::RECOGNIZED
        .iter()
        .map(|p| json!({ "slug": p.slug(), "label": p.label() }))
        .collect();
    Json(json!({ "personas": list }))
}

/// GET /api/health
pub(super) async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let o = &state.orchestrator;
    Json(json!({
        "app": &*state.app_name,
        "status": if o.has_credential() { "ok" } else { "degraded" },
        "provider": o.provider().name(),
        "model": o.provider().model(),
        "credential": o.has_credential(),
    }))
}
