//! Billing Domain - the bill-creation transaction
//!
//! This crate is the core of the back-office: it validates a billing request
//! against the live customer directory and catalog, prices each line from a
//! snapshot of the item's current unit price, allocates a unique bill number,
//! and hands the whole bill to the ledger for one atomic write.
//!
//! # Invariants
//!
//! - Money arithmetic is exact decimal; totals are the exact sum of
//!   `unit_price x qty` over the lines.
//! - A bill and its line items are persisted together or not at all.
//! - Bill numbers are unique across all stored bills; the allocation race is
//!   resolved by retrying on a duplicate-number insert.
//! - The price captured on a line item is a snapshot; later catalog price
//!   changes never alter an existing bill.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{BillingService, BillItemRequest};
//!
//! let service = BillingService::new(customers, catalog, allocator, ledger);
//! let bill_no = service
//!     .create_bill("ACC000005", &[BillItemRequest { item_id: 3, qty: 2 }])
//!     .await?;
//! ```

pub mod bill;
pub mod error;
pub mod ports;
pub mod service;

pub use bill::{Bill, BillItem, BillItemRequest, NewBill, NewBillItem};
pub use error::{BillingError, ErrorCategory, LedgerError};
pub use ports::{BillLedger, BillNumberAllocator, CatalogReader, CustomerDirectory};
pub use service::BillingService;
