use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("Customer not found")]
    NotFound,

    #[error("Customer with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Storage(#[from] mongodb::error::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CustomerResult<T> = Result<T, CustomerError>;

impl From<CustomerError> for AppError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::NotFound => AppError::NotFound("Customer not found".to_string()),
            CustomerError::DuplicateEmail(email) => {
                AppError::Conflict(format!("Customer with email '{}' already exists", email))
            }
            // Unknown email and wrong password are indistinguishable outward
            CustomerError::InvalidCredentials => {
                AppError::Unauthorized("Invalid email or password".to_string())
            }
            CustomerError::Validation(msg) => AppError::BadRequest(msg),
            CustomerError::Storage(e) => AppError::Database(e),
            CustomerError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CustomerError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
