//! Convenience result type alias for ShareLink.

use crate::error::AppError;

/// A specialized `Result` type for ShareLink operations.
pub type AppResult<T> = Result<T, AppError>;
