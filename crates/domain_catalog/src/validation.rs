//! Item field validation rules
//!
//! # Rules
//!
//! - SKU: required, at most 50 characters
//! - Name: required, at most 200 characters
//! - Unit price: strictly positive, at most 99,999,999.99, two decimal places

use crate::error::CatalogError;
use crate::item::NewItem;
use core_kernel::MAX_UNIT_PRICE;

const MAX_SKU_LEN: usize = 50;
const MAX_NAME_LEN: usize = 200;

/// Validates an item draft, returning the first violation
pub fn validate(item: &NewItem) -> Result<(), CatalogError> {
    let sku = item.sku.trim();
    if sku.is_empty() {
        return Err(CatalogError::validation("SKU is required"));
    }
    if sku.chars().count() > MAX_SKU_LEN {
        return Err(CatalogError::validation(format!(
            "SKU cannot exceed {MAX_SKU_LEN} characters"
        )));
    }

    let name = item.name.trim();
    if name.is_empty() {
        return Err(CatalogError::validation("Item name is required"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CatalogError::validation(format!(
            "Item name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }

    if !item.unit_price.is_valid_unit_price() {
        return Err(CatalogError::validation(format!(
            "Unit price must be positive and cannot exceed {MAX_UNIT_PRICE}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_item() {
        let item = NewItem::new("BK-100", "Intro to Rust", Money::new(dec!(25.00)));
        assert!(validate(&item).is_ok());
    }

    #[test]
    fn test_sku_rules() {
        assert!(validate(&NewItem::new("", "Name", Money::new(dec!(1.00)))).is_err());
        assert!(validate(&NewItem::new("s".repeat(51), "Name", Money::new(dec!(1.00)))).is_err());
        assert!(validate(&NewItem::new("s".repeat(50), "Name", Money::new(dec!(1.00)))).is_ok());
    }

    #[test]
    fn test_name_rules() {
        assert!(validate(&NewItem::new("SKU", "", Money::new(dec!(1.00)))).is_err());
        assert!(validate(&NewItem::new("SKU", "n".repeat(201), Money::new(dec!(1.00)))).is_err());
    }

    #[test]
    fn test_price_bounds() {
        assert!(validate(&NewItem::new("SKU", "Name", Money::ZERO)).is_err());
        assert!(validate(&NewItem::new("SKU", "Name", Money::new(dec!(-1.00)))).is_err());
        assert!(validate(&NewItem::new("SKU", "Name", Money::new(dec!(99999999.99)))).is_ok());
        assert!(validate(&NewItem::new("SKU", "Name", Money::new(dec!(100000000.00)))).is_err());
    }
}
