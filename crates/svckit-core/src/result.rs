//! Convenience result type alias for svckit.

use crate::error::AppError;

/// A specialized `Result` type for svckit operations.
pub type AppResult<T> = Result<T, AppError>;
