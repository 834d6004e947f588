//! Core Kernel - Foundational types for the retail billing back-office
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money with precise decimal arithmetic (no binary floating point)
//! - Surrogate-id newtypes and formatted external identifiers
//! - Common error types

pub mod error;
pub mod identifiers;
pub mod money;

pub use error::CoreError;
pub use identifiers::{AccountNumber, BillId, BillItemId, BillNumber, CustomerId, ItemId};
pub use money::{Money, MoneyError, Quantity, MAX_QUANTITY, MAX_UNIT_PRICE};
