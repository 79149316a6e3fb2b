//! # accounthub-api
//!
//! HTTP API layer for AccountHub built on Axum.
//!
//! Provides the account endpoints, cookie session handling, middleware
//! (CORS, logging, timeouts), extractors, DTOs and error mapping.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
