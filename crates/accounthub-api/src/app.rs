//! Application builder: wires router, middleware and state into an Axum app.

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware as axum_middleware;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use accounthub_core::config::StorageProviderKind;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::middleware::timeout::timeout_envelope;
use crate::router::{build_router, normalize_prefix};
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let config = state.config.clone();
    let mut router = build_router(&state);

    let local = &config.storage.local;
    if config.storage.provider == StorageProviderKind::Local {
        if let Some(serve_path) = normalize_prefix(&local.serve_path) {
            tracing::debug!(
                path = %serve_path,
                root = %local.root_path,
                "Serving uploaded media"
            );
            router = router.nest_service(&serve_path, ServeDir::new(&local.root_path));
        }
    }

    router
        .layer(DefaultBodyLimit::max(config.server.max_upload_size_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.request_timeout_seconds),
        ))
        .layer(axum_middleware::map_response(timeout_envelope))
        .layer(build_cors_layer(&config.server.cors))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}
