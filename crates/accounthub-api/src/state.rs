//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use accounthub_core::config::AppConfig;
use accounthub_service::AccountService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Registration, login and session token workflows
    pub account_service: Arc<AccountService>,
}

impl AppState {
    /// Creates the state from its parts.
    pub fn new(config: Arc<AppConfig>, account_service: Arc<AccountService>) -> Self {
        Self {
            config,
            account_service,
        }
    }
}
