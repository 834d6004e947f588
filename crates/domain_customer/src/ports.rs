//! Customer domain ports
//!
//! The `CustomerStore` trait defines everything the customer service needs
//! from its data source. The production adapter lives in `infra_db`; an
//! in-memory mock is provided here for tests.

use async_trait::async_trait;

use core_kernel::{AccountNumber, CustomerId};

use crate::customer::{Customer, NewCustomer};
use crate::error::CustomerError;

/// Persistence contract for customers
///
/// `create` owns account-number assignment: the number is derived from the
/// surrogate id after insert and written back in the same transaction, so
/// it is unique and assigned exactly once.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Inserts a customer and assigns its account number
    async fn create(&self, draft: NewCustomer) -> Result<Customer, CustomerError>;

    /// Updates the editable fields of an existing customer
    ///
    /// The stored account number is preserved regardless of input.
    async fn update(&self, id: CustomerId, draft: NewCustomer) -> Result<Customer, CustomerError>;

    /// Looks a customer up by surrogate id
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, CustomerError>;

    /// Looks a customer up by external account number
    async fn find_by_account_number(
        &self,
        account_number: &AccountNumber,
    ) -> Result<Option<Customer>, CustomerError>;

    /// Substring search over account number and name
    async fn search(&self, query: &str) -> Result<Vec<Customer>, CustomerError>;

    /// Returns all customers
    async fn list(&self) -> Result<Vec<Customer>, CustomerError>;

    /// Deletes a customer by surrogate id
    async fn delete(&self, id: CustomerId) -> Result<(), CustomerError>;
}

/// In-memory mock implementation of `CustomerStore` for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory customer store with sequential id assignment
    #[derive(Debug, Default)]
    pub struct InMemoryCustomerStore {
        customers: Arc<RwLock<BTreeMap<i64, Customer>>>,
    }

    impl InMemoryCustomerStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the store for tests
        pub async fn with_customers(drafts: Vec<NewCustomer>) -> Self {
            let store = Self::new();
            for draft in drafts {
                store.create(draft).await.expect("seeding mock store");
            }
            store
        }
    }

    #[async_trait]
    impl CustomerStore for InMemoryCustomerStore {
        async fn create(&self, draft: NewCustomer) -> Result<Customer, CustomerError> {
            let mut customers = self.customers.write().await;
            let id = customers.keys().next_back().copied().unwrap_or(0) + 1;
            let now = Utc::now();
            let customer = Customer {
                id: CustomerId::new(id),
                account_number: AccountNumber::from_id(CustomerId::new(id)),
                name: draft.name,
                address: draft.address,
                phone: draft.phone,
                created_at: now,
                updated_at: now,
            };
            customers.insert(id, customer.clone());
            Ok(customer)
        }

        async fn update(
            &self,
            id: CustomerId,
            draft: NewCustomer,
        ) -> Result<Customer, CustomerError> {
            let mut customers = self.customers.write().await;
            let existing = customers
                .get_mut(&id.get())
                .ok_or_else(|| CustomerError::not_found(id))?;
            existing.name = draft.name;
            existing.address = draft.address;
            existing.phone = draft.phone;
            existing.updated_at = Utc::now();
            Ok(existing.clone())
        }

        async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, CustomerError> {
            Ok(self.customers.read().await.get(&id.get()).cloned())
        }

        async fn find_by_account_number(
            &self,
            account_number: &AccountNumber,
        ) -> Result<Option<Customer>, CustomerError> {
            Ok(self
                .customers
                .read()
                .await
                .values()
                .find(|c| &c.account_number == account_number)
                .cloned())
        }

        async fn search(&self, query: &str) -> Result<Vec<Customer>, CustomerError> {
            let needle = query.to_lowercase();
            Ok(self
                .customers
                .read()
                .await
                .values()
                .filter(|c| {
                    c.name.to_lowercase().contains(&needle)
                        || c.account_number.as_str().to_lowercase().contains(&needle)
                })
                .cloned()
                .collect())
        }

        async fn list(&self) -> Result<Vec<Customer>, CustomerError> {
            Ok(self.customers.read().await.values().cloned().collect())
        }

        async fn delete(&self, id: CustomerId) -> Result<(), CustomerError> {
            self.customers
                .write()
                .await
                .remove(&id.get())
                .map(|_| ())
                .ok_or_else(|| CustomerError::not_found(id))
        }
    }
}
