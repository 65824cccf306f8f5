// src/handlers/fallback.rs

use crate::error::AppError;

/// Router fallback for paths no route matches.
pub async fn not_found() -> AppError {
    AppError::NotFound("The requested resource was not found.".to_string())
}

/// Router fallback for known paths called with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("The method is not allowed for the requested URL.".to_string())
}
