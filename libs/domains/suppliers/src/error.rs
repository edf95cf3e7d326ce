use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupplierError {
    #[error("Supplier not found")]
    NotFound,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Storage(#[from] mongodb::error::Error),
}

pub type SupplierResult<T> = Result<T, SupplierError>;

impl From<SupplierError> for AppError {
    fn from(err: SupplierError) -> Self {
        match err {
            SupplierError::NotFound => AppError::NotFound("Supplier not found".to_string()),
            SupplierError::Validation(msg) => AppError::BadRequest(msg),
            SupplierError::Storage(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for SupplierError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
