/*
 * Responsibility
 * - GET /health (liveness)
 * - Never goes through realm resolution
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
