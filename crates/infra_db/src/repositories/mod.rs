//! Repository implementations for the domain ports
//!
//! Each repository wraps a `PgPool`, encapsulates its SQL, and maps between
//! database rows and domain types. Multi-row writes (customer creation, bill
//! creation) run inside a single transaction.

pub mod bills;
pub mod customers;
pub mod items;

pub use bills::PgBillLedger;
pub use customers::PgCustomerStore;
pub use items::PgCatalogStore;
