//! Catalog repository implementation
//!
//! PostgreSQL adapter for `domain_catalog::CatalogStore`. The service checks
//! SKU uniqueness before writing; if a concurrent writer slips past that
//! check, the unique index reports it and we surface `DuplicateSku`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use core_kernel::{ItemId, Money};
use domain_billing::{CatalogReader, LedgerError};
use domain_catalog::{CatalogError, CatalogStore, Item, NewItem};

use crate::error::DatabaseError;

const ITEM_COLUMNS: &str = "id, sku, name, unit_price, active, created_at, updated_at";

/// PostgreSQL-backed implementation of `CatalogStore`
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    /// Creates a new store over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn create(&self, draft: NewItem) -> Result<Item, CatalogError> {
        let row: ItemRow = sqlx::query_as(&format!(
            "INSERT INTO items (sku, name, unit_price, active) VALUES ($1, $2, $3, $4) \
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(&draft.sku)
        .bind(&draft.name)
        .bind(draft.unit_price.amount())
        .bind(draft.active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| sku_aware_err(e, &draft.sku))?;

        Ok(row.into())
    }

    async fn update(&self, id: ItemId, draft: NewItem) -> Result<Item, CatalogError> {
        let row: Option<ItemRow> = sqlx::query_as(&format!(
            "UPDATE items SET sku = $1, name = $2, unit_price = $3, active = $4, \
             updated_at = now() WHERE id = $5 RETURNING {ITEM_COLUMNS}"
        ))
        .bind(&draft.sku)
        .bind(&draft.name)
        .bind(draft.unit_price.amount())
        .bind(draft.active)
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| sku_aware_err(e, &draft.sku))?;

        row.map(Item::from).ok_or_else(|| CatalogError::not_found(id))
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, CatalogError> {
        let row: Option<ItemRow> =
            sqlx::query_as(&format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = $1"))
                .bind(id.get())
                .fetch_optional(&self.pool)
                .await
                .map_err(store_err)?;

        Ok(row.map(Item::from))
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Option<Item>, CatalogError> {
        let row: Option<ItemRow> =
            sqlx::query_as(&format!("SELECT {ITEM_COLUMNS} FROM items WHERE sku = $1"))
                .bind(sku)
                .fetch_optional(&self.pool)
                .await
                .map_err(store_err)?;

        Ok(row.map(Item::from))
    }

    async fn search(&self, query: &str) -> Result<Vec<Item>, CatalogError> {
        let pattern = format!("%{}%", query);
        let rows: Vec<ItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE sku ILIKE $1 OR name ILIKE $1 ORDER BY id"
        ))
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn list(&self) -> Result<Vec<Item>, CatalogError> {
        let rows: Vec<ItemRow> =
            sqlx::query_as(&format!("SELECT {ITEM_COLUMNS} FROM items ORDER BY id"))
                .fetch_all(&self.pool)
                .await
                .map_err(store_err)?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn delete(&self, id: ItemId) -> Result<(), CatalogError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogReader for PgCatalogStore {
    async fn find_item(&self, id: ItemId) -> Result<Option<Item>, LedgerError> {
        self.find_by_id(id)
            .await
            .map_err(|e| LedgerError::storage(e.to_string()))
    }
}

/// Database row for a catalog item
#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: i64,
    sku: String,
    name: String,
    unit_price: Decimal,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: ItemId::new(row.id),
            sku: row.sku,
            name: row.name,
            unit_price: Money::new(row.unit_price),
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn store_err(e: sqlx::Error) -> CatalogError {
    CatalogError::store(DatabaseError::from(e).to_string())
}

fn sku_aware_err(e: sqlx::Error, sku: &str) -> CatalogError {
    let db_err = DatabaseError::from(e);
    if db_err.violates_constraint("items_sku_key") {
        CatalogError::DuplicateSku(sku.to_string())
    } else {
        CatalogError::store(db_err.to_string())
    }
}
