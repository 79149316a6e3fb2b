//! Request timeout responses in the standard error envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use accounthub_core::error::AppError;

use crate::error::ApiError;

/// Replaces the empty 408 produced by the timeout layer with the JSON
/// error body every other failure uses.
pub async fn timeout_envelope(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    ApiError(AppError::timeout("Request timed out")).into_response()
}
