use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RentalError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Booking not found: {0}")]
    BookingNotFound(Uuid),

    #[error("Review not found: {0}")]
    ReviewNotFound(Uuid),

    #[error("Business rule violation: {0}")]
    RuleViolation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type RentalResult<T> = Result<T, RentalError>;

impl From<domain_catalog::CatalogError> for RentalError {
    fn from(err: domain_catalog::CatalogError) -> Self {
        RentalError::Internal(err.to_string())
    }
}

/// Convert RentalError to AppError for standardized error responses
impl From<RentalError> for AppError {
    fn from(err: RentalError) -> Self {
        match err {
            RentalError::Validation(msg) => AppError::BadRequest(msg),
            RentalError::UserNotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            RentalError::ProductNotFound(id) => {
                AppError::NotFound(format!("Product {} not found", id))
            }
            RentalError::BookingNotFound(id) => {
                AppError::NotFound(format!("Booking {} not found", id))
            }
            RentalError::ReviewNotFound(id) => {
                AppError::NotFound(format!("Review {} not found", id))
            }
            RentalError::RuleViolation(msg) => AppError::Conflict(msg),
            RentalError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for RentalError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
