//! Route definitions for the AccountHub HTTP API.
//!
//! Account routes are served at the root and, when `server.api_prefix` is
//! set, again under that prefix.

use axum::{
    Router,
    routing::{get, post},
};

use accounthub_core::error::AppError;

use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

/// Build the route table without middleware.
pub fn build_router(state: &AppState) -> Router<AppState> {
    let routes = account_routes().merge(health_routes());

    let mut router = Router::new().merge(routes.clone());

    if let Some(prefix) = normalize_prefix(&state.config.server.api_prefix) {
        router = router.nest(&prefix, routes);
    }

    router.fallback(route_not_found)
}

/// Registration, login, logout, token refresh and profile endpoints.
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::account::register))
        .route("/login", post(handlers::account::login))
        .route("/logout", post(handlers::account::logout))
        .route("/refresh-token", post(handlers::account::refresh_token))
        .route("/current-user", get(handlers::account::current_user))
}

/// Health endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

async fn route_not_found() -> ApiError {
    AppError::not_found("Route not found").into()
}

/// `Some("/api/v1/users")` for a usable prefix, `None` for an empty or root one.
pub(crate) fn normalize_prefix(prefix: &str) -> Option<String> {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{trimmed}"))
    }
}
