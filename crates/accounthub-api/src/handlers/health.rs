//! Health check handler.

use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> ApiResponse<HealthResponse> {
    let database = state.account_service.store_healthy().await;
    let storage = state.account_service.uploader_healthy().await;
    let status = if database && storage { "ok" } else { "degraded" };

    ApiResponse::ok(
        HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
            storage,
        },
        "Service is running",
    )
}
