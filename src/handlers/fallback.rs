// src/handlers/fallback.rs

use crate::error::AppError;

/// No route matched the path.
pub async fn not_found() -> AppError {
    AppError::NotFound("no route for this path".to_string())
}

/// The path exists but not for this method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
