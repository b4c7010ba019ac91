use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, error_response};

/// Fallback handler returning the standard JSON envelope for unknown routes.
pub async fn not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        ErrorCode::NotFound.default_message(),
        ErrorCode::NotFound,
    )
}
