//! Convenience result type alias for AccountHub.

use crate::error::AppError;

/// A specialized `Result` type for AccountHub operations.
pub type AppResult<T> = Result<T, AppError>;
