//! Core error types used across the system

use thiserror::Error;

use crate::money::MoneyError;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid {0}: '{1}'")]
    InvalidIdentifier(String, String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CoreError::NotFound(message.into())
    }

    pub fn invalid_identifier(kind: impl Into<String>, value: impl Into<String>) -> Self {
        CoreError::InvalidIdentifier(kind.into(), value.into())
    }
}
