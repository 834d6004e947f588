//! Customer domain errors

use thiserror::Error;

/// Errors that can occur in the customer domain
#[derive(Debug, Error)]
pub enum CustomerError {
    /// Field validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Customer not found
    #[error("Customer not found: {0}")]
    NotFound(String),

    /// Underlying store failure
    #[error("Store error: {0}")]
    Store(String),
}

impl CustomerError {
    pub fn validation(message: impl Into<String>) -> Self {
        CustomerError::Validation(message.into())
    }

    pub fn not_found(id: impl std::fmt::Display) -> Self {
        CustomerError::NotFound(id.to_string())
    }

    pub fn store(message: impl Into<String>) -> Self {
        CustomerError::Store(message.into())
    }

    /// True for errors the caller can fix by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(self, CustomerError::Validation(_) | CustomerError::NotFound(_))
    }
}
