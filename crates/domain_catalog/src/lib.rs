//! Catalog Domain - items and pricing
//!
//! The catalog holds the sellable items: SKU, display name, current unit
//! price, and an active flag used as a soft-delete marker. Billing reads the
//! catalog but never writes it; price changes here do not touch prices
//! already captured on bills.

pub mod error;
pub mod item;
pub mod ports;
pub mod service;
pub mod validation;

pub use error::CatalogError;
pub use item::{Item, NewItem};
pub use ports::CatalogStore;
pub use service::CatalogService;
