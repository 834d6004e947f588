//! Catalog item entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ItemId, Money};

/// A sellable catalog item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Internal surrogate id
    pub id: ItemId,
    /// Stock-keeping unit, unique across the catalog
    pub sku: String,
    /// Display name
    pub name: String,
    /// Current unit price; bills snapshot this value at creation time
    pub unit_price: Money,
    /// Soft-delete marker; inactive items cannot be billed
    pub active: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// Field data for creating or updating an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub sku: String,
    pub name: String,
    pub unit_price: Money,
    pub active: bool,
}

impl NewItem {
    /// Creates an active item draft
    pub fn new(sku: impl Into<String>, name: impl Into<String>, unit_price: Money) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            unit_price,
            active: true,
        }
    }

    /// Marks the draft inactive
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}
