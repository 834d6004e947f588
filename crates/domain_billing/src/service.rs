//! Billing transaction coordinator
//!
//! `BillingService` orchestrates the bill-creation workflow: structural
//! validation, customer and item lookups (fail fast, first violation wins),
//! exact-decimal pricing, bill-number allocation, and the atomic write.
//! The service holds no state between calls; all concurrency safety is
//! delegated to the ledger's transaction boundary.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use core_kernel::{AccountNumber, BillId, BillNumber, ItemId, Money, Quantity, MAX_QUANTITY};

use crate::bill::{Bill, BillItemRequest, NewBill, NewBillItem};
use crate::error::{BillingError, LedgerError};
use crate::ports::{BillLedger, BillNumberAllocator, CatalogReader, CustomerDirectory};

/// How many times a lost bill-number race is retried before giving up
const MAX_ALLOCATION_ATTEMPTS: u32 = 3;

/// The billing transaction coordinator
pub struct BillingService {
    customers: Arc<dyn CustomerDirectory>,
    catalog: Arc<dyn CatalogReader>,
    allocator: Arc<dyn BillNumberAllocator>,
    ledger: Arc<dyn BillLedger>,
}

impl BillingService {
    /// Creates a coordinator over the given collaborators
    pub fn new(
        customers: Arc<dyn CustomerDirectory>,
        catalog: Arc<dyn CatalogReader>,
        allocator: Arc<dyn BillNumberAllocator>,
        ledger: Arc<dyn BillLedger>,
    ) -> Self {
        Self {
            customers,
            catalog,
            allocator,
            ledger,
        }
    }

    /// Creates a bill for a customer from a list of (item, quantity) requests
    ///
    /// Validation runs entirely before any persistence, in a fixed order:
    /// request shape, then customer existence, then each item in request
    /// order. The bill number is allocated only after validation passes, and
    /// the header plus all line items are written in one transaction. On any
    /// failure the caller observes no partial state.
    ///
    /// # Errors
    ///
    /// - `Validation` for request-shape violations
    /// - `CustomerNotFound` / `ItemNotFound` / `ItemNotActive` for unknown
    ///   or unusable entities
    /// - `Ledger` when the atomic write itself fails (after rollback)
    pub async fn create_bill(
        &self,
        customer_account_number: &str,
        items: &[BillItemRequest],
    ) -> Result<BillNumber, BillingError> {
        let account_raw = validate_request(customer_account_number, items)?;

        // Unknown and malformed account numbers are indistinguishable to the
        // caller: neither matches a customer.
        let account: AccountNumber = account_raw
            .parse()
            .map_err(|_| BillingError::CustomerNotFound(account_raw.to_string()))?;

        self.customers
            .find_by_account_number(&account)
            .await?
            .ok_or_else(|| BillingError::CustomerNotFound(account_raw.to_string()))?;

        // Price each line from the item's current unit price, in request
        // order. The grand total accumulates in the same order.
        let mut lines = Vec::with_capacity(items.len());
        let mut total = Money::ZERO;
        for request in items {
            let item_id = ItemId::new(request.item_id);
            let item = self
                .catalog
                .find_item(item_id)
                .await?
                .ok_or(BillingError::ItemNotFound(item_id))?;
            if !item.active {
                return Err(BillingError::ItemNotActive {
                    id: item.id,
                    name: item.name,
                });
            }

            let qty = Quantity::new(request.qty)
                .map_err(|e| BillingError::validation(e.to_string()))?;
            let line_total = item
                .unit_price
                .times(qty)
                .map_err(|e| BillingError::validation(e.to_string()))?;
            total = total
                .checked_add(&line_total)
                .map_err(|e| BillingError::validation(e.to_string()))?;

            lines.push(NewBillItem {
                item_id: item.id,
                qty,
                unit_price: item.unit_price,
                line_total,
            });
        }

        // Numbering happens only now, so validation failures never consume a
        // number. The allocation itself can still race a concurrent create:
        // the unique index on bill_no turns that into DuplicateBillNumber,
        // and we reallocate from fresh durable state.
        let mut attempt = 0;
        loop {
            attempt += 1;
            let bill_no = self.allocator.next().await?;

            let new_bill = NewBill {
                bill_no: bill_no.clone(),
                customer_account: account.clone(),
                bill_date: Utc::now(),
                total,
                items: lines.clone(),
            };

            match self.ledger.create(new_bill).await {
                Ok(bill) => {
                    info!(bill_no = %bill.bill_no, total = %bill.total, "bill created");
                    return Ok(bill.bill_no);
                }
                Err(LedgerError::DuplicateBillNumber(taken))
                    if attempt < MAX_ALLOCATION_ATTEMPTS =>
                {
                    warn!(bill_no = %taken, attempt, "bill number taken, reallocating");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Fetches a bill by bill number; blank or malformed input finds nothing
    pub async fn find_by_bill_number(
        &self,
        bill_no: &str,
    ) -> Result<Option<Bill>, BillingError> {
        let Ok(bill_no) = bill_no.trim().parse::<BillNumber>() else {
            return Ok(None);
        };
        Ok(self.ledger.find_by_bill_number(&bill_no).await?)
    }

    /// Fetches all bills for a customer account, newest first
    pub async fn find_by_customer(
        &self,
        account_number: &str,
    ) -> Result<Vec<Bill>, BillingError> {
        let Ok(account) = account_number.trim().parse::<AccountNumber>() else {
            return Ok(Vec::new());
        };
        Ok(self.ledger.find_by_customer_account(&account).await?)
    }

    /// Fetches a bill by surrogate id
    pub async fn find_by_id(&self, id: BillId) -> Result<Option<Bill>, BillingError> {
        Ok(self.ledger.find_by_id(id).await?)
    }

    /// Deletes a bill and its line items
    pub async fn delete_bill(&self, id: BillId) -> Result<(), BillingError> {
        if self.ledger.find_by_id(id).await?.is_none() {
            return Err(BillingError::BillNotFound(id.to_string()));
        }
        Ok(self.ledger.delete(id).await?)
    }
}

/// Structural validation of the request shape; first violation wins
fn validate_request<'a>(
    customer_account_number: &'a str,
    items: &[BillItemRequest],
) -> Result<&'a str, BillingError> {
    let account = customer_account_number.trim();
    if account.is_empty() {
        return Err(BillingError::validation(
            "Valid customer account number is required",
        ));
    }

    if items.is_empty() {
        return Err(BillingError::validation(
            "At least one bill item is required",
        ));
    }

    for item in items {
        if item.item_id <= 0 {
            return Err(BillingError::validation("Valid item ID is required"));
        }
        if item.qty < 1 {
            return Err(BillingError::validation(
                "Quantity must be greater than zero",
            ));
        }
        if item.qty > MAX_QUANTITY as i64 {
            return Err(BillingError::validation(format!(
                "Quantity cannot exceed {MAX_QUANTITY}"
            )));
        }
    }

    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_validation_order() {
        // Account number checked before the item list.
        let err = validate_request("", &[]).unwrap_err();
        assert!(err.to_string().contains("account number"));

        let err = validate_request("ACC000001", &[]).unwrap_err();
        assert!(err.to_string().contains("At least one"));

        let items = [BillItemRequest { item_id: 0, qty: 1 }];
        let err = validate_request("ACC000001", &items).unwrap_err();
        assert!(err.to_string().contains("item ID"));

        let items = [BillItemRequest { item_id: 1, qty: 0 }];
        let err = validate_request("ACC000001", &items).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));

        let items = [BillItemRequest {
            item_id: 1,
            qty: 10_000,
        }];
        let err = validate_request("ACC000001", &items).unwrap_err();
        assert!(err.to_string().contains("9999"));
    }

    #[test]
    fn valid_request_passes_trimmed() {
        let items = [BillItemRequest { item_id: 1, qty: 9999 }];
        assert_eq!(
            validate_request("  ACC000001  ", &items).unwrap(),
            "ACC000001"
        );
    }
}
