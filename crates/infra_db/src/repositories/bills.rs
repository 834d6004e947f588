//! Bill ledger implementation
//!
//! PostgreSQL adapter backing both `BillLedger` and `BillNumberAllocator`.
//! Bill creation writes the header and every line item in one transaction;
//! a bill-number collision rolls the whole transaction back and surfaces as
//! `LedgerError::DuplicateBillNumber` so the coordinator can reallocate.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::debug;

use core_kernel::{AccountNumber, BillId, BillItemId, BillNumber, ItemId, Money, Quantity};
use domain_billing::{Bill, BillItem, BillLedger, BillNumberAllocator, LedgerError, NewBill};

use crate::error::DatabaseError;

const BILL_COLUMNS: &str = "id, bill_no, customer_account, bill_date, total, created_at";
const BILL_ITEM_COLUMNS: &str = "id, bill_id, item_id, qty, unit_price, line_total";

/// PostgreSQL-backed bill ledger and number allocator
///
/// Both traits are backed by the same `bills` table, so allocation reads the
/// same durable state the ledger writes.
#[derive(Debug, Clone)]
pub struct PgBillLedger {
    pool: PgPool,
}

impl PgBillLedger {
    /// Creates a new ledger over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_items(&self, bill_id: i64) -> Result<Vec<BillItem>, LedgerError> {
        let rows: Vec<BillItemRow> = sqlx::query_as(&format!(
            "SELECT {BILL_ITEM_COLUMNS} FROM bill_items WHERE bill_id = $1 ORDER BY id"
        ))
        .bind(bill_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        rows.into_iter().map(row_to_bill_item).collect()
    }

    async fn assemble(&self, row: BillRow) -> Result<Bill, LedgerError> {
        let items = self.load_items(row.id).await?;
        row_to_bill(row, items)
    }
}

#[async_trait]
impl BillNumberAllocator for PgBillLedger {
    async fn next(&self) -> Result<BillNumber, LedgerError> {
        // Numeric suffix starts after the "BILL-" prefix.
        let max_suffix: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(CAST(SUBSTRING(bill_no FROM 6) AS INTEGER)), 0) FROM bills",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(BillNumber::from_suffix(max_suffix as u32 + 1))
    }
}

#[async_trait]
impl BillLedger for PgBillLedger {
    async fn create(&self, bill: NewBill) -> Result<Bill, LedgerError> {
        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        let header: BillRow = sqlx::query_as(&format!(
            "INSERT INTO bills (bill_no, customer_account, bill_date, total) \
             VALUES ($1, $2, $3, $4) RETURNING {BILL_COLUMNS}"
        ))
        .bind(bill.bill_no.as_str())
        .bind(bill.customer_account.as_str())
        .bind(bill.bill_date)
        .bind(bill.total.amount())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| insert_err(e, &bill.bill_no))?;

        let mut items = Vec::with_capacity(bill.items.len());
        for line in &bill.items {
            let row: BillItemRow = sqlx::query_as(&format!(
                "INSERT INTO bill_items (bill_id, item_id, qty, unit_price, line_total) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING {BILL_ITEM_COLUMNS}"
            ))
            .bind(header.id)
            .bind(line.item_id.get())
            .bind(line.qty.get() as i32)
            .bind(line.unit_price.amount())
            .bind(line.line_total.amount())
            .fetch_one(&mut *tx)
            .await
            .map_err(storage_err)?;
            items.push(row_to_bill_item(row)?);
        }

        tx.commit().await.map_err(storage_err)?;
        debug!(bill_no = %bill.bill_no, lines = items.len(), "bill rows committed");
        row_to_bill(header, items)
    }

    async fn find_by_bill_number(
        &self,
        bill_no: &BillNumber,
    ) -> Result<Option<Bill>, LedgerError> {
        let row: Option<BillRow> = sqlx::query_as(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE bill_no = $1"
        ))
        .bind(bill_no.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;

        match row {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_customer_account(
        &self,
        account_number: &AccountNumber,
    ) -> Result<Vec<Bill>, LedgerError> {
        let rows: Vec<BillRow> = sqlx::query_as(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE customer_account = $1 \
             ORDER BY bill_date DESC, id DESC"
        ))
        .bind(account_number.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        let mut bills = Vec::with_capacity(rows.len());
        for row in rows {
            bills.push(self.assemble(row).await?);
        }
        Ok(bills)
    }

    async fn find_by_id(&self, id: BillId) -> Result<Option<Bill>, LedgerError> {
        let row: Option<BillRow> =
            sqlx::query_as(&format!("SELECT {BILL_COLUMNS} FROM bills WHERE id = $1"))
                .bind(id.get())
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_err)?;

        match row {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: BillId) -> Result<(), LedgerError> {
        // Line items go with the header via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM bills WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::NotFound(format!("bill id {id}")));
        }
        Ok(())
    }
}

/// Database row for a bill header
#[derive(Debug, sqlx::FromRow)]
struct BillRow {
    id: i64,
    bill_no: String,
    customer_account: String,
    bill_date: DateTime<Utc>,
    total: Decimal,
    created_at: DateTime<Utc>,
}

/// Database row for a bill line item
#[derive(Debug, sqlx::FromRow)]
struct BillItemRow {
    id: i64,
    bill_id: i64,
    item_id: i64,
    qty: i32,
    unit_price: Decimal,
    line_total: Decimal,
}

fn row_to_bill(row: BillRow, items: Vec<BillItem>) -> Result<Bill, LedgerError> {
    let bill_no = row
        .bill_no
        .parse::<BillNumber>()
        .map_err(|e| LedgerError::storage(e.to_string()))?;
    let customer_account = row
        .customer_account
        .parse::<AccountNumber>()
        .map_err(|e| LedgerError::storage(e.to_string()))?;

    Ok(Bill {
        id: BillId::new(row.id),
        bill_no,
        customer_account,
        bill_date: row.bill_date,
        total: Money::new(row.total),
        created_at: row.created_at,
        items,
    })
}

fn row_to_bill_item(row: BillItemRow) -> Result<BillItem, LedgerError> {
    let qty = Quantity::new(i64::from(row.qty))
        .map_err(|e| LedgerError::storage(e.to_string()))?;

    Ok(BillItem {
        id: BillItemId::new(row.id),
        bill_id: BillId::new(row.bill_id),
        item_id: ItemId::new(row.item_id),
        qty,
        unit_price: Money::new(row.unit_price),
        line_total: Money::new(row.line_total),
    })
}

fn storage_err(e: sqlx::Error) -> LedgerError {
    LedgerError::storage(DatabaseError::from(e).to_string())
}

fn insert_err(e: sqlx::Error, bill_no: &BillNumber) -> LedgerError {
    let db_err = DatabaseError::from(e);
    if db_err.violates_constraint("bills_bill_no_key") {
        LedgerError::DuplicateBillNumber(bill_no.clone())
    } else {
        LedgerError::storage(db_err.to_string())
    }
}
