use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::errors::{ErrorCode, ErrorResponse};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found")]
    NotFound,

    /// Search collapses every failure (malformed ids included) into this.
    #[error("not found")]
    SearchFailed,

    /// The unpaginated listing path's generic failure.
    #[error("Get all products failed")]
    ListFailed,

    /// Violated category/supplier references, one message each.
    #[error("Unavailable")]
    References(Vec<String>),

    #[error("Product with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound => AppError::NotFound("Product not found".to_string()),
            // Search failures deliberately collapse to the same outward
            // not-found class as missing records
            ProductError::SearchFailed => AppError::NotFound("not found".to_string()),
            ProductError::ListFailed => {
                AppError::BadRequest("Get all products failed".to_string())
            }
            ProductError::References(violations) => {
                AppError::BadRequest(format!("Unavailable: {}", violations.join(", ")))
            }
            ProductError::DuplicateName(name) => {
                AppError::Conflict(format!("Product with name '{}' already exists", name))
            }
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Database(msg) => AppError::InternalServerError(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        match self {
            // Reference violations carry the full list of violated
            // constraints in the details field
            ProductError::References(violations) => {
                let body = ErrorResponse::new(ErrorCode::ValidationError, "Unavailable")
                    .with_details(serde_json::json!({ "error": violations }));
                (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
            }
            other => {
                let app_error: AppError = other.into();
                app_error.into_response()
            }
        }
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<domain_categories::CategoryError> for ProductError {
    fn from(err: domain_categories::CategoryError) -> Self {
        ProductError::Internal(err.to_string())
    }
}

impl From<domain_suppliers::SupplierError> for ProductError {
    fn from(err: domain_suppliers::SupplierError) -> Self {
        ProductError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_failure_maps_to_not_found() {
        let response = ProductError::SearchFailed.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_list_failure_maps_to_bad_request() {
        let response = ProductError::ListFailed.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_reference_violations_map_to_bad_request() {
        let response = ProductError::References(vec![
            "Category not found".to_string(),
            "Supplier is deleted".to_string(),
        ])
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_duplicate_name_maps_to_conflict() {
        let response = ProductError::DuplicateName("Phone".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
