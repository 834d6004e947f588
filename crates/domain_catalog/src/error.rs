//! Catalog domain errors

use thiserror::Error;

/// Errors that can occur in the catalog domain
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Field validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Item not found
    #[error("Item not found: {0}")]
    NotFound(String),

    /// SKU already taken by another item
    #[error("SKU already exists: {0}")]
    DuplicateSku(String),

    /// Underlying store failure
    #[error("Store error: {0}")]
    Store(String),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }

    pub fn not_found(id: impl std::fmt::Display) -> Self {
        CatalogError::NotFound(id.to_string())
    }

    pub fn store(message: impl Into<String>) -> Self {
        CatalogError::Store(message.into())
    }

    /// True for errors the caller can fix by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CatalogError::Validation(_) | CatalogError::NotFound(_) | CatalogError::DuplicateSku(_)
        )
    }
}
