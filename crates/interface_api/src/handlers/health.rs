//! Health handlers

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness probe
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Readiness probe; the store is in-process, so ready equals alive
pub async fn readiness_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ready" })
}
