//! Billing error taxonomy
//!
//! Callers branch on the error category, never on message text. Three
//! categories exist: invalid input, entity not found, and internal failure.

use thiserror::Error;

use core_kernel::{BillNumber, ItemId};

/// Errors raised by the persistence boundary
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The allocated bill number lost a race with a concurrent insert
    #[error("Bill number already taken: {0}")]
    DuplicateBillNumber(BillNumber),

    /// Referenced row does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Connection or transaction failure; the write was rolled back
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl LedgerError {
    pub fn storage(message: impl Into<String>) -> Self {
        LedgerError::Storage(message.into())
    }
}

/// Errors that can occur during the bill-creation transaction
#[derive(Debug, Error)]
pub enum BillingError {
    /// Request shape violation (empty account number, empty item list,
    /// non-positive item id, quantity out of range)
    #[error("Validation error: {0}")]
    Validation(String),

    /// No customer with the given account number
    #[error("Customer not found with account number: {0}")]
    CustomerNotFound(String),

    /// No item with the given id
    #[error("Item not found with ID: {0}")]
    ItemNotFound(ItemId),

    /// The item exists but has been deactivated
    #[error("Item is not active: {name}")]
    ItemNotActive { id: ItemId, name: String },

    /// No bill with the given identifier
    #[error("Bill not found: {0}")]
    BillNotFound(String),

    /// Persistence failure; no partial state was committed
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Error category exposed to the request-handling layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed or invalid input; a client error, never retried
    InvalidInput,
    /// A referenced entity does not exist (or is inactive); client error
    NotFound,
    /// Unexpected internal failure; safe to retry, nothing was committed
    Internal,
}

impl BillingError {
    pub fn validation(message: impl Into<String>) -> Self {
        BillingError::Validation(message.into())
    }

    /// Returns the category callers branch on
    pub fn category(&self) -> ErrorCategory {
        match self {
            BillingError::Validation(_) => ErrorCategory::InvalidInput,
            BillingError::CustomerNotFound(_)
            | BillingError::ItemNotFound(_)
            | BillingError::ItemNotActive { .. }
            | BillingError::BillNotFound(_) => ErrorCategory::NotFound,
            BillingError::Ledger(_) => ErrorCategory::Internal,
        }
    }

    /// True for errors the caller can fix by changing the request
    pub fn is_client_error(&self) -> bool {
        self.category() != ErrorCategory::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            BillingError::validation("bad").category(),
            ErrorCategory::InvalidInput
        );
        assert_eq!(
            BillingError::CustomerNotFound("ACC000099".into()).category(),
            ErrorCategory::NotFound
        );
        assert_eq!(
            BillingError::ItemNotFound(ItemId::new(3)).category(),
            ErrorCategory::NotFound
        );
        assert_eq!(
            BillingError::Ledger(LedgerError::storage("boom")).category(),
            ErrorCategory::Internal
        );
    }

    #[test]
    fn test_client_error_flag() {
        assert!(BillingError::validation("bad").is_client_error());
        assert!(!BillingError::Ledger(LedgerError::storage("boom")).is_client_error());
    }
}
