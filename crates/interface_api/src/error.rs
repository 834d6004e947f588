//! API error handling
//!
//! Errors surface as `{error, message}` JSON bodies. Domain errors map to
//! status codes by category, never by message inspection.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_billing::{BillingError, ErrorCategory};
use domain_catalog::CatalogError;
use domain_customer::CustomerError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ApiError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status();
        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        match err.category() {
            ErrorCategory::InvalidInput => ApiError::BadRequest(err.to_string()),
            ErrorCategory::NotFound => ApiError::NotFound(err.to_string()),
            ErrorCategory::Internal => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<CustomerError> for ApiError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::Validation(_) => ApiError::BadRequest(err.to_string()),
            CustomerError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CustomerError::Store(_) => ApiError::Database(err.to_string()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(_) => ApiError::BadRequest(err.to_string()),
            CatalogError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CatalogError::DuplicateSku(_) => ApiError::Conflict(err.to_string()),
            CatalogError::Store(_) => ApiError::Database(err.to_string()),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ItemId;

    #[test]
    fn billing_categories_map_to_status_codes() {
        let cases = [
            (
                BillingError::validation("At least one bill item is required"),
                StatusCode::BAD_REQUEST,
            ),
            (
                BillingError::ItemNotFound(ItemId::new(9)),
                StatusCode::NOT_FOUND,
            ),
            (
                BillingError::CustomerNotFound("ACC000042".to_string()),
                StatusCode::NOT_FOUND,
            ),
        ];

        for (err, expected) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status().0, expected);
        }
    }

    #[test]
    fn duplicate_sku_is_a_conflict() {
        let api: ApiError = CatalogError::DuplicateSku("BK-100".to_string()).into();
        assert_eq!(api.status().0, StatusCode::CONFLICT);
    }
}
