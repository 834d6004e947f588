//! Catalog domain ports
//!
//! `CatalogStore` is the persistence contract the catalog service owns. The
//! store does NOT enforce SKU uniqueness; that rule belongs to the service,
//! which checks before writing.

use async_trait::async_trait;

use core_kernel::ItemId;

use crate::error::CatalogError;
use crate::item::{Item, NewItem};

/// Persistence contract for catalog items
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Inserts an item and returns it with its assigned id
    async fn create(&self, draft: NewItem) -> Result<Item, CatalogError>;

    /// Updates an existing item
    async fn update(&self, id: ItemId, draft: NewItem) -> Result<Item, CatalogError>;

    /// Looks an item up by surrogate id
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, CatalogError>;

    /// Looks an item up by SKU
    async fn find_by_sku(&self, sku: &str) -> Result<Option<Item>, CatalogError>;

    /// Substring search over SKU and name
    async fn search(&self, query: &str) -> Result<Vec<Item>, CatalogError>;

    /// Returns all items
    async fn list(&self) -> Result<Vec<Item>, CatalogError>;

    /// Deletes an item by surrogate id
    async fn delete(&self, id: ItemId) -> Result<(), CatalogError>;
}

/// In-memory mock implementation of `CatalogStore` for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory catalog store with sequential id assignment
    #[derive(Debug, Default)]
    pub struct InMemoryCatalogStore {
        items: Arc<RwLock<BTreeMap<i64, Item>>>,
    }

    impl InMemoryCatalogStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the store for tests
        pub async fn with_items(drafts: Vec<NewItem>) -> Self {
            let store = Self::new();
            for draft in drafts {
                store.create(draft).await.expect("seeding mock store");
            }
            store
        }
    }

    #[async_trait]
    impl CatalogStore for InMemoryCatalogStore {
        async fn create(&self, draft: NewItem) -> Result<Item, CatalogError> {
            let mut items = self.items.write().await;
            let id = items.keys().next_back().copied().unwrap_or(0) + 1;
            let now = Utc::now();
            let item = Item {
                id: ItemId::new(id),
                sku: draft.sku,
                name: draft.name,
                unit_price: draft.unit_price,
                active: draft.active,
                created_at: now,
                updated_at: now,
            };
            items.insert(id, item.clone());
            Ok(item)
        }

        async fn update(&self, id: ItemId, draft: NewItem) -> Result<Item, CatalogError> {
            let mut items = self.items.write().await;
            let existing = items
                .get_mut(&id.get())
                .ok_or_else(|| CatalogError::not_found(id))?;
            existing.sku = draft.sku;
            existing.name = draft.name;
            existing.unit_price = draft.unit_price;
            existing.active = draft.active;
            existing.updated_at = Utc::now();
            Ok(existing.clone())
        }

        async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, CatalogError> {
            Ok(self.items.read().await.get(&id.get()).cloned())
        }

        async fn find_by_sku(&self, sku: &str) -> Result<Option<Item>, CatalogError> {
            Ok(self
                .items
                .read()
                .await
                .values()
                .find(|i| i.sku == sku)
                .cloned())
        }

        async fn search(&self, query: &str) -> Result<Vec<Item>, CatalogError> {
            let needle = query.to_lowercase();
            Ok(self
                .items
                .read()
                .await
                .values()
                .filter(|i| {
                    i.sku.to_lowercase().contains(&needle)
                        || i.name.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect())
        }

        async fn list(&self) -> Result<Vec<Item>, CatalogError> {
            Ok(self.items.read().await.values().cloned().collect())
        }

        async fn delete(&self, id: ItemId) -> Result<(), CatalogError> {
            self.items
                .write()
                .await
                .remove(&id.get())
                .map(|_| ())
                .ok_or_else(|| CatalogError::not_found(id))
        }
    }
}
