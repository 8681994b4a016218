use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode, error_response};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("No product found with the product id {0}")]
    NotFound(String),

    #[error("No products found in the category {0}")]
    NoProductsInCategory(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{0}")]
    InvalidQuery(#[from] QueryRejection),

    #[error("Invalid product: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("Attempting to bind disallowed fields: {}", .0.join(", "))]
    DisallowedFields(Vec<String>),

    #[error("Product with id '{0}' already exists")]
    DuplicateId(String),

    #[error("{0}")]
    Attachment(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) | ProductError::NoProductsInCategory(_) => {
                AppError::NotFound(err.to_string())
            }
            ProductError::InvalidPrice(_) | ProductError::DisallowedFields(_) => {
                AppError::BadRequest(err.to_string())
            }
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::InvalidQuery(rejection) => AppError::QueryRejection(rejection),
            ProductError::Invalid(errors) => AppError::ValidationError(errors),
            ProductError::DuplicateId(_) => AppError::Conflict(err.to_string()),
            ProductError::Attachment(msg) => AppError::InternalServerError(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        match self {
            ProductError::NotFound(ref id) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    invalid_product_id = %id,
                    "Product lookup failed"
                );
                error_response(
                    StatusCode::NOT_FOUND,
                    self.to_string(),
                    ErrorCode::NotFound,
                    Some(serde_json::json!({ "invalidProductId": id })),
                )
            }
            other => AppError::from(other).into_response(),
        }
    }
}
