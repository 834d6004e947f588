//! Bill and line-item types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AccountNumber, BillId, BillItemId, BillNumber, ItemId, Money, Quantity};

/// A persisted bill with its line items
///
/// Bills are immutable after creation except for administrative deletion,
/// which cascades to the line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    /// Internal surrogate id
    pub id: BillId,
    /// Stable external identifier (`BILL-000042`)
    pub bill_no: BillNumber,
    /// Account number of the billed customer (not the surrogate id)
    pub customer_account: AccountNumber,
    /// When the bill was raised
    pub bill_date: DateTime<Utc>,
    /// Sum of line totals
    pub total: Money,
    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
    /// Line items in request order
    pub items: Vec<BillItem>,
}

/// One line on a bill
///
/// `unit_price` is the price captured at bill time; it is a snapshot, not a
/// live reference to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillItem {
    /// Internal surrogate id
    pub id: BillItemId,
    /// Owning bill
    pub bill_id: BillId,
    /// Catalog item this line refers to
    pub item_id: ItemId,
    /// Quantity billed
    pub qty: Quantity,
    /// Unit price at bill time
    pub unit_price: Money,
    /// `unit_price x qty`
    pub line_total: Money,
}

/// One (item, quantity) entry of an incoming billing request
///
/// Raw wire-level integers; validation turns these into [`NewBillItem`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillItemRequest {
    pub item_id: i64,
    pub qty: i64,
}

/// A fully validated, priced bill ready for one atomic write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBill {
    pub bill_no: BillNumber,
    pub customer_account: AccountNumber,
    pub bill_date: DateTime<Utc>,
    pub total: Money,
    pub items: Vec<NewBillItem>,
}

/// A validated, priced line awaiting persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBillItem {
    pub item_id: ItemId,
    pub qty: Quantity,
    pub unit_price: Money,
    pub line_total: Money,
}
