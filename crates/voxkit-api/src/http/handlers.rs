//! HTTP request handlers.

use axum::Json;
use axum::extract::State;

use voxkit_types::request::RequestEnvelope;
use voxkit_types::response::ResponseEnvelope;

use crate::state::AppState;

/// POST /v1/skill - dispatch one request envelope.
///
/// Dispatch never fails; unroutable requests come back as error responses
/// inside a valid envelope.
pub async fn invoke(
    State(state): State<AppState>,
    Json(request): Json<RequestEnvelope>,
) -> Json<ResponseEnvelope> {
    Json(state.router.dispatch(&request))
}

/// GET /health - liveness check.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
