//! Customer application service
//!
//! Wraps the store with field validation and the account-number-preservation
//! rule on update.

use std::sync::Arc;

use core_kernel::{AccountNumber, CustomerId};
use tracing::debug;

use crate::customer::{Customer, NewCustomer};
use crate::error::CustomerError;
use crate::ports::CustomerStore;
use crate::validation;

/// Service for managing customers
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    /// Creates a new service over the given store
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    /// Creates a customer; the store assigns id and account number
    pub async fn create(&self, draft: NewCustomer) -> Result<Customer, CustomerError> {
        validation::validate(&draft)?;
        let customer = self.store.create(draft).await?;
        debug!(account = %customer.account_number, "customer created");
        Ok(customer)
    }

    /// Updates a customer's editable fields
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown, `Validation` on bad fields.
    pub async fn update(
        &self,
        id: CustomerId,
        draft: NewCustomer,
    ) -> Result<Customer, CustomerError> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(CustomerError::not_found(id));
        }
        validation::validate(&draft)?;
        self.store.update(id, draft).await
    }

    /// Looks a customer up by surrogate id
    pub async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, CustomerError> {
        self.store.find_by_id(id).await
    }

    /// Looks a customer up by account number
    pub async fn find_by_account_number(
        &self,
        account_number: &AccountNumber,
    ) -> Result<Option<Customer>, CustomerError> {
        self.store.find_by_account_number(account_number).await
    }

    /// Substring search over account number and name; empty query yields
    /// nothing rather than everything
    pub async fn search(&self, query: &str) -> Result<Vec<Customer>, CustomerError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.store.search(query).await
    }

    /// Returns all customers
    pub async fn list(&self) -> Result<Vec<Customer>, CustomerError> {
        self.store.list().await
    }

    /// Deletes a customer
    pub async fn delete(&self, id: CustomerId) -> Result<(), CustomerError> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(CustomerError::not_found(id));
        }
        self.store.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::InMemoryCustomerStore;

    fn service() -> CustomerService {
        CustomerService::new(Arc::new(InMemoryCustomerStore::new()))
    }

    #[tokio::test]
    async fn create_assigns_sequential_account_numbers() {
        let svc = service();
        let first = svc.create(NewCustomer::new("First")).await.unwrap();
        let second = svc.create(NewCustomer::new("Second")).await.unwrap();

        assert_eq!(first.account_number.as_str(), "ACC000001");
        assert_eq!(second.account_number.as_str(), "ACC000002");
    }

    #[tokio::test]
    async fn create_rejects_invalid_fields() {
        let svc = service();
        let err = svc.create(NewCustomer::new("")).await.unwrap_err();
        assert!(matches!(err, CustomerError::Validation(_)));
    }

    #[tokio::test]
    async fn update_preserves_account_number() {
        let svc = service();
        let created = svc.create(NewCustomer::new("Before")).await.unwrap();

        let updated = svc
            .update(created.id, NewCustomer::new("After"))
            .await
            .unwrap();

        assert_eq!(updated.name, "After");
        assert_eq!(updated.account_number, created.account_number);
    }

    #[tokio::test]
    async fn update_unknown_customer_is_not_found() {
        let svc = service();
        let err = svc
            .update(CustomerId::new(999), NewCustomer::new("Ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, CustomerError::NotFound(_)));
    }

    #[tokio::test]
    async fn search_matches_name_and_account_number() {
        let svc = service();
        svc.create(NewCustomer::new("Nimal Perera")).await.unwrap();
        svc.create(NewCustomer::new("Kamala Silva")).await.unwrap();

        let by_name = svc.search("nimal").await.unwrap();
        assert_eq!(by_name.len(), 1);

        let by_account = svc.search("ACC000002").await.unwrap();
        assert_eq!(by_account.len(), 1);
        assert_eq!(by_account[0].name, "Kamala Silva");

        assert!(svc.search("  ").await.unwrap().is_empty());
    }
}
