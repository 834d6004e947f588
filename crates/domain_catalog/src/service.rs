//! Catalog application service
//!
//! Wraps the store with validation and the SKU-uniqueness rule. Soft delete
//! (deactivation) and hard delete are both supported; billing only ever sees
//! active items.

use std::sync::Arc;

use core_kernel::ItemId;
use tracing::debug;

use crate::error::CatalogError;
use crate::item::{Item, NewItem};
use crate::ports::CatalogStore;
use crate::validation;

/// Service for managing catalog items
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    /// Creates a new service over the given store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Creates an item, enforcing SKU uniqueness
    pub async fn create(&self, draft: NewItem) -> Result<Item, CatalogError> {
        validation::validate(&draft)?;
        if self.store.find_by_sku(draft.sku.trim()).await?.is_some() {
            return Err(CatalogError::DuplicateSku(draft.sku));
        }
        let item = self.store.create(draft).await?;
        debug!(sku = %item.sku, id = %item.id, "item created");
        Ok(item)
    }

    /// Updates an item; a changed SKU must not collide with another item
    pub async fn update(&self, id: ItemId, draft: NewItem) -> Result<Item, CatalogError> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(CatalogError::not_found(id));
        }
        validation::validate(&draft)?;
        if let Some(existing) = self.store.find_by_sku(draft.sku.trim()).await? {
            if existing.id != id {
                return Err(CatalogError::DuplicateSku(draft.sku));
            }
        }
        self.store.update(id, draft).await
    }

    /// Marks an item inactive without removing its row
    pub async fn deactivate(&self, id: ItemId) -> Result<Item, CatalogError> {
        let item = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(id))?;
        let draft = NewItem {
            sku: item.sku,
            name: item.name,
            unit_price: item.unit_price,
            active: false,
        };
        self.store.update(id, draft).await
    }

    /// Looks an item up by surrogate id
    pub async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, CatalogError> {
        self.store.find_by_id(id).await
    }

    /// Looks an item up by SKU
    pub async fn find_by_sku(&self, sku: &str) -> Result<Option<Item>, CatalogError> {
        let sku = sku.trim();
        if sku.is_empty() {
            return Ok(None);
        }
        self.store.find_by_sku(sku).await
    }

    /// Substring search over SKU and name
    pub async fn search(&self, query: &str) -> Result<Vec<Item>, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.store.search(query).await
    }

    /// Returns all items
    pub async fn list(&self) -> Result<Vec<Item>, CatalogError> {
        self.store.list().await
    }

    /// Hard-deletes an item
    pub async fn delete(&self, id: ItemId) -> Result<(), CatalogError> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(CatalogError::not_found(id));
        }
        self.store.delete(id).await
    }
}
