//! Customer Domain - customer records and account numbering
//!
//! Customers carry two identifiers: an internal surrogate id assigned by the
//! store, and an external account number (`ACC` + 6 digits) derived from that
//! id exactly once, at creation. The account number is what every other part
//! of the system references; the surrogate id never leaves this domain.

pub mod customer;
pub mod error;
pub mod ports;
pub mod service;
pub mod validation;

pub use customer::{Customer, NewCustomer};
pub use error::CustomerError;
pub use ports::CustomerStore;
pub use service::CustomerService;
