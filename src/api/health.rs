//! Health check endpoints

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{error::AppResult, AppState};

#[derive(Serialize)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<&'static str>,
}

/// Liveness probe
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: None,
    })
}

/// Readiness probe; fails while the store is unreachable
pub async fn readiness_check(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let backend = state.services.catalog.ping().await?;
    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: Some(backend),
    }))
}
