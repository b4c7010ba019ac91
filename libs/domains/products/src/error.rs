use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

const DUPLICATE_NAME_MESSAGE: &str = "Name must be unique.";

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Product with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Product with id '{0}' was not found.")]
    NotFound(Uuid),

    #[error("Unit of work has been disposed")]
    Disposed,
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(errors) => AppError::ValidationError(errors),
            ProductError::DuplicateName(_) => AppError::Conflict(DUPLICATE_NAME_MESSAGE.to_string()),
            err @ ProductError::NotFound(_) => AppError::NotFound(err.to_string()),
            err @ ProductError::Disposed => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
