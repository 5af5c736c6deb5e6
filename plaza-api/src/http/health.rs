//! Health probe

use axum::{response::IntoResponse, Json};
use serde_json::json;

/// GET /healthz
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
