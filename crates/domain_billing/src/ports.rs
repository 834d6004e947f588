//! Billing ports
//!
//! The coordinator consumes four contracts it does not implement itself: two
//! read-only lookups (customers, catalog), the bill-number allocator, and the
//! ledger that persists bills. Production adapters live in `infra_db`;
//! in-memory versions are provided here for tests.

use async_trait::async_trait;

use core_kernel::{AccountNumber, BillId, BillNumber, ItemId};
use domain_catalog::Item;
use domain_customer::Customer;

use crate::bill::{Bill, NewBill};
use crate::error::LedgerError;

/// Read contract over the customer store
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    /// Looks a customer up by external account number
    async fn find_by_account_number(
        &self,
        account_number: &AccountNumber,
    ) -> Result<Option<Customer>, LedgerError>;
}

/// Read contract over the catalog
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Looks an item up by surrogate id, exposing `unit_price` and `active`
    async fn find_item(&self, id: ItemId) -> Result<Option<Item>, LedgerError>;
}

/// Produces candidate bill numbers from durable state
///
/// The contract is max(numeric suffix of existing `BILL-` numbers) + 1, so
/// the sequence survives restarts and a deleted highest-numbered bill frees
/// its number for reuse. Two concurrent allocations can produce the same
/// candidate; the ledger's uniqueness constraint catches that and the
/// coordinator reallocates.
#[async_trait]
pub trait BillNumberAllocator: Send + Sync {
    /// Returns the next candidate bill number; `BILL-000001` on empty state
    async fn next(&self) -> Result<BillNumber, LedgerError>;
}

/// Persistence boundary for bills
#[async_trait]
pub trait BillLedger: Send + Sync {
    /// Persists the header and every line item as a single atomic unit
    ///
    /// Either all rows are visible after this returns `Ok`, or none are. A
    /// bill-number collision surfaces as `LedgerError::DuplicateBillNumber`
    /// after the transaction has been rolled back.
    async fn create(&self, bill: NewBill) -> Result<Bill, LedgerError>;

    /// Fetches a bill with its line items by bill number
    async fn find_by_bill_number(
        &self,
        bill_no: &BillNumber,
    ) -> Result<Option<Bill>, LedgerError>;

    /// Fetches all bills for a customer account, newest first
    async fn find_by_customer_account(
        &self,
        account_number: &AccountNumber,
    ) -> Result<Vec<Bill>, LedgerError>;

    /// Fetches a bill with its line items by surrogate id
    async fn find_by_id(&self, id: BillId) -> Result<Option<Bill>, LedgerError>;

    /// Deletes a bill; its line items go with it
    async fn delete(&self, id: BillId) -> Result<(), LedgerError>;
}

/// In-memory adapters for testing without a database
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::BillItemId;
    use domain_catalog::ports::mock::InMemoryCatalogStore;
    use domain_catalog::CatalogStore;
    use domain_customer::ports::mock::InMemoryCustomerStore;
    use domain_customer::CustomerStore;

    use crate::bill::BillItem;

    /// In-memory bill ledger with a unique index on bill number
    ///
    /// Implements both `BillLedger` and `BillNumberAllocator`, mirroring
    /// the production adapter which backs both with the same table.
    #[derive(Debug, Default)]
    pub struct InMemoryBillLedger {
        bills: Arc<RwLock<BTreeMap<i64, Bill>>>,
    }

    impl InMemoryBillLedger {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl BillLedger for InMemoryBillLedger {
        async fn create(&self, bill: NewBill) -> Result<Bill, LedgerError> {
            let mut bills = self.bills.write().await;

            if bills.values().any(|b| b.bill_no == bill.bill_no) {
                return Err(LedgerError::DuplicateBillNumber(bill.bill_no));
            }

            let bill_id = bills.keys().next_back().copied().unwrap_or(0) + 1;
            let items = bill
                .items
                .into_iter()
                .enumerate()
                .map(|(i, item)| BillItem {
                    id: BillItemId::new((bill_id - 1) * 1000 + i as i64 + 1),
                    bill_id: BillId::new(bill_id),
                    item_id: item.item_id,
                    qty: item.qty,
                    unit_price: item.unit_price,
                    line_total: item.line_total,
                })
                .collect();

            let stored = Bill {
                id: BillId::new(bill_id),
                bill_no: bill.bill_no,
                customer_account: bill.customer_account,
                bill_date: bill.bill_date,
                total: bill.total,
                created_at: Utc::now(),
                items,
            };
            bills.insert(bill_id, stored.clone());
            Ok(stored)
        }

        async fn find_by_bill_number(
            &self,
            bill_no: &BillNumber,
        ) -> Result<Option<Bill>, LedgerError> {
            Ok(self
                .bills
                .read()
                .await
                .values()
                .find(|b| &b.bill_no == bill_no)
                .cloned())
        }

        async fn find_by_customer_account(
            &self,
            account_number: &AccountNumber,
        ) -> Result<Vec<Bill>, LedgerError> {
            let mut bills: Vec<Bill> = self
                .bills
                .read()
                .await
                .values()
                .filter(|b| &b.customer_account == account_number)
                .cloned()
                .collect();
            bills.sort_by(|a, b| b.bill_date.cmp(&a.bill_date));
            Ok(bills)
        }

        async fn find_by_id(&self, id: BillId) -> Result<Option<Bill>, LedgerError> {
            Ok(self.bills.read().await.get(&id.get()).cloned())
        }

        async fn delete(&self, id: BillId) -> Result<(), LedgerError> {
            self.bills
                .write()
                .await
                .remove(&id.get())
                .map(|_| ())
                .ok_or_else(|| LedgerError::NotFound(format!("Bill with id '{id}' not found")))
        }
    }

    #[async_trait]
    impl BillNumberAllocator for InMemoryBillLedger {
        async fn next(&self) -> Result<BillNumber, LedgerError> {
            let max = self
                .bills
                .read()
                .await
                .values()
                .map(|b| b.bill_no.suffix())
                .max()
                .unwrap_or(0);
            Ok(BillNumber::from_suffix(max + 1))
        }
    }

    #[async_trait]
    impl CustomerDirectory for InMemoryCustomerStore {
        async fn find_by_account_number(
            &self,
            account_number: &AccountNumber,
        ) -> Result<Option<Customer>, LedgerError> {
            CustomerStore::find_by_account_number(self, account_number)
                .await
                .map_err(|e| LedgerError::storage(e.to_string()))
        }
    }

    #[async_trait]
    impl CatalogReader for InMemoryCatalogStore {
        async fn find_item(&self, id: ItemId) -> Result<Option<Item>, LedgerError> {
            CatalogStore::find_by_id(self, id)
                .await
                .map_err(|e| LedgerError::storage(e.to_string()))
        }
    }
}
