//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "error": "INTERNAL_ERROR",
        "message": "An unexpected error occurred.",
        "detail": "lock poisoned",
        "timestamp": "2024-05-01T12:00:00Z"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

/// 400 for create and replace operations; one example per error code.
#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid body or business rule violated",
    content_type = "application/json",
    examples(
        ("Validation" = (
            summary = "A field failed validation",
            value = json!({
                "error": "VALIDATION_ERROR",
                "message": "Validation failed",
                "errors": [
                    { "field": "name", "message": "Name is required." },
                    { "field": "price", "message": "Price must be greater than 0." }
                ],
                "timestamp": "2024-05-01T12:00:00Z"
            })
        )),
        ("Conflict" = (
            summary = "The name is already taken",
            value = json!({
                "error": "CONFLICT",
                "message": "Name must be unique.",
                "timestamp": "2024-05-01T12:00:00Z"
            })
        )),
        ("MalformedJson" = (
            summary = "The body is not valid JSON",
            value = json!({
                "error": "JSON_EXTRACTION",
                "message": "Failed to parse the request body as JSON",
                "timestamp": "2024-05-01T12:00:00Z"
            })
        ))
    )
)]
pub struct BadRequestWriteResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid UUID",
    content_type = "application/json",
    example = json!({
        "error": "INVALID_UUID",
        "message": "Invalid UUID: not-a-uuid",
        "timestamp": "2024-05-01T12:00:00Z"
    })
)]
pub struct BadRequestUuidResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "error": "NOT_FOUND",
        "message": "Product with id '0190a3c4-7d1e-7b4a-9c1e-3f2a1b0c9d8e' was not found.",
        "timestamp": "2024-05-01T12:00:00Z"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);
