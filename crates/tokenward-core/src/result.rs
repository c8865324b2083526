//! Convenience result type alias for Tokenward.

use crate::error::AppError;

/// A specialized `Result` type for Tokenward operations.
pub type AppResult<T> = Result<T, AppError>;
