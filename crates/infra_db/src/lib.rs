//! Database infrastructure layer
//!
//! This crate provides the PostgreSQL adapters for the billing back office,
//! implementing the store and ledger traits the domain crates define.
//!
//! # Architecture
//!
//! Each domain port gets one repository struct over a shared `PgPool`:
//!
//! - [`PgCustomerStore`] implements `domain_customer::CustomerStore`
//! - [`PgCatalogStore`] implements `domain_catalog::CatalogStore`
//! - [`PgBillLedger`] implements `domain_billing::BillLedger` and
//!   `domain_billing::BillNumberAllocator`
//!
//! Queries are bound at runtime so the crate builds without a live
//! database; the schema lives in `migrations/` and is applied with
//! [`run_migrations`].
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, run_migrations, PgBillLedger};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/billing")).await?;
//! run_migrations(&pool).await?;
//! let ledger = PgBillLedger::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool};
pub use repositories::{PgBillLedger, PgCatalogStore, PgCustomerStore};
