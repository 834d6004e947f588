//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for the billing back office. Fixtures are
//! deterministic so tests can assert on derived values like account
//! numbers and bill totals.

use core_kernel::Money;
use domain_catalog::NewItem;
use domain_customer::NewCustomer;
use rust_decimal_macros::dec;

/// Fixture for customer drafts
pub struct CustomerFixtures;

impl CustomerFixtures {
    /// A fully populated customer
    pub fn alice() -> NewCustomer {
        NewCustomer::new("Alice Carter")
            .with_address("12 Baker Street, Springfield")
            .with_phone("+1 (555) 010-2345")
    }

    /// A customer with only the required fields
    pub fn bob() -> NewCustomer {
        NewCustomer::new("Bob Okafor")
    }

    /// A batch of drafts; created in order they yield ACC000001..ACC000005
    pub fn five_customers() -> Vec<NewCustomer> {
        ["Alice Carter", "Bob Okafor", "Carol Singh", "Dan Wu", "Eve Novak"]
            .into_iter()
            .map(NewCustomer::new)
            .collect()
    }
}

/// Fixture for catalog item drafts
pub struct ItemFixtures;

impl ItemFixtures {
    /// Standard book item at 19.99
    pub fn book() -> NewItem {
        NewItem::new("BK-100", "Intro to Rust", Money::new(dec!(19.99)))
    }

    /// Notebook at a round 5.00
    pub fn notebook() -> NewItem {
        NewItem::new("NB-200", "Spiral Notebook", Money::new(dec!(5.00)))
    }

    /// Higher-value item at 100.00
    pub fn gadget() -> NewItem {
        NewItem::new("GD-300", "Label Printer", Money::new(dec!(100.00)))
    }

    /// An item that is no longer sold
    pub fn discontinued() -> NewItem {
        NewItem::new("OLD-900", "Retired Widget", Money::new(dec!(9.99))).inactive()
    }
}

/// Fixture for well-known identifier strings
pub struct IdFixtures;

impl IdFixtures {
    /// Account number of the first created customer
    pub fn first_account() -> &'static str {
        "ACC000001"
    }

    /// Bill number of the first created bill
    pub fn first_bill_no() -> &'static str {
        "BILL-000001"
    }

    /// An account number that is well-formed but never assigned in fixtures
    pub fn unknown_account() -> &'static str {
        "ACC999999"
    }
}
