//! Test Utilities Crate
//!
//! Shared test infrastructure for the billing back-office test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for customers, items, and amounts
//! - `builders`: Builder patterns for test data construction
//! - `database`: PostgreSQL testcontainer management for integration tests
//! - `assertions`: Custom assertion helpers for domain types

pub mod assertions;
pub mod builders;
pub mod database;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use database::*;
pub use fixtures::*;

// In-memory port adapters, re-exported so tests outside the domain crates
// can wire services without a database.
pub use domain_billing::ports::mock::InMemoryBillLedger;
pub use domain_catalog::ports::mock::InMemoryCatalogStore;
pub use domain_customer::ports::mock::InMemoryCustomerStore;
