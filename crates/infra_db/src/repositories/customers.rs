//! Customer repository implementation
//!
//! PostgreSQL adapter for `domain_customer::CustomerStore`. Account numbers
//! are assigned here: the row is inserted, the number is derived from the
//! returned id, and written back, all inside one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use core_kernel::{AccountNumber, CustomerId};
use domain_billing::{CustomerDirectory, LedgerError};
use domain_customer::{Customer, CustomerError, CustomerStore, NewCustomer};

use crate::error::DatabaseError;

const CUSTOMER_COLUMNS: &str =
    "id, account_number, name, address, phone, created_at, updated_at";

/// PostgreSQL-backed implementation of `CustomerStore`
#[derive(Debug, Clone)]
pub struct PgCustomerStore {
    pool: PgPool,
}

impl PgCustomerStore {
    /// Creates a new store over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn create(&self, draft: NewCustomer) -> Result<Customer, CustomerError> {
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO customers (name, address, phone) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&draft.name)
        .bind(&draft.address)
        .bind(&draft.phone)
        .fetch_one(&mut *tx)
        .await
        .map_err(store_err)?;

        let account_number = AccountNumber::from_id(CustomerId::new(id));
        let row: CustomerRow = sqlx::query_as(&format!(
            "UPDATE customers SET account_number = $1 WHERE id = $2 RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(account_number.as_str())
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(store_err)?;

        tx.commit().await.map_err(store_err)?;
        debug!(account_number = %account_number, "customer row created");
        row_to_customer(row)
    }

    async fn update(&self, id: CustomerId, draft: NewCustomer) -> Result<Customer, CustomerError> {
        let row: Option<CustomerRow> = sqlx::query_as(&format!(
            "UPDATE customers SET name = $1, address = $2, phone = $3, updated_at = now() \
             WHERE id = $4 RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(&draft.address)
        .bind(&draft.phone)
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        row.map(row_to_customer)
            .transpose()?
            .ok_or_else(|| CustomerError::not_found(id))
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, CustomerError> {
        let row: Option<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        row.map(row_to_customer).transpose()
    }

    async fn find_by_account_number(
        &self,
        account_number: &AccountNumber,
    ) -> Result<Option<Customer>, CustomerError> {
        let row: Option<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE account_number = $1"
        ))
        .bind(account_number.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        row.map(row_to_customer).transpose()
    }

    async fn search(&self, query: &str) -> Result<Vec<Customer>, CustomerError> {
        let pattern = format!("%{}%", query);
        let rows: Vec<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers \
             WHERE name ILIKE $1 OR account_number ILIKE $1 ORDER BY id"
        ))
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        rows.into_iter().map(row_to_customer).collect()
    }

    async fn list(&self) -> Result<Vec<Customer>, CustomerError> {
        let rows: Vec<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        rows.into_iter().map(row_to_customer).collect()
    }

    async fn delete(&self, id: CustomerId) -> Result<(), CustomerError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        if result.rows_affected() == 0 {
            return Err(CustomerError::not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl CustomerDirectory for PgCustomerStore {
    async fn find_by_account_number(
        &self,
        account_number: &AccountNumber,
    ) -> Result<Option<Customer>, LedgerError> {
        CustomerStore::find_by_account_number(self, account_number)
            .await
            .map_err(|e| LedgerError::storage(e.to_string()))
    }
}

/// Database row for a customer
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    account_number: Option<String>,
    name: String,
    address: Option<String>,
    phone: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn row_to_customer(row: CustomerRow) -> Result<Customer, CustomerError> {
    // NULL only exists inside the creating transaction, so a visible row
    // always carries a well-formed account number.
    let account_number = row
        .account_number
        .as_deref()
        .unwrap_or_default()
        .parse::<AccountNumber>()
        .map_err(|e| CustomerError::store(e.to_string()))?;

    Ok(Customer {
        id: CustomerId::new(row.id),
        account_number,
        name: row.name,
        address: row.address,
        phone: row.phone,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn store_err(e: sqlx::Error) -> CustomerError {
    CustomerError::store(DatabaseError::from(e).to_string())
}
