//! Catalog item DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::Money;
use domain_catalog::{Item, NewItem};

/// Request body for creating or updating a catalog item
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub sku: String,
    pub name: String,
    pub unit_price: Decimal,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl From<ItemRequest> for NewItem {
    fn from(request: ItemRequest) -> Self {
        NewItem {
            sku: request.sku,
            name: request.name,
            unit_price: Money::new(request.unit_price),
            active: request.active,
        }
    }
}

/// Full catalog item representation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub unit_price: Money,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.get(),
            sku: item.sku,
            name: item.name,
            unit_price: item.unit_price,
            active: item.active,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn request_defaults_to_active() {
        let request: ItemRequest = serde_json::from_str(
            r#"{"sku": "BK-100", "name": "Intro to Rust", "unitPrice": "19.99"}"#,
        )
        .unwrap();
        assert!(request.active);
        assert_eq!(request.unit_price, dec!(19.99));
    }

    #[test]
    fn unit_price_accepts_json_numbers() {
        let request: ItemRequest = serde_json::from_str(
            r#"{"sku": "NB-200", "name": "Notebook", "unitPrice": 5.00, "active": false}"#,
        )
        .unwrap();
        assert_eq!(request.unit_price, dec!(5.00));
        assert!(!request.active);
    }
}
