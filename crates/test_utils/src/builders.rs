//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults, so
//! tests only spell out the fields they actually care about.

use core_kernel::Money;
use domain_billing::BillItemRequest;
use domain_catalog::NewItem;
use domain_customer::NewCustomer;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::IdFixtures;

/// Builder for customer drafts
pub struct TestCustomerBuilder {
    name: String,
    address: Option<String>,
    phone: Option<String>,
}

impl Default for TestCustomerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCustomerBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            name: "Test Customer".to_string(),
            address: None,
            phone: None,
        }
    }

    /// Sets the customer name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the address
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Builds the draft
    pub fn build(self) -> NewCustomer {
        let mut draft = NewCustomer::new(self.name);
        if let Some(address) = self.address {
            draft = draft.with_address(address);
        }
        if let Some(phone) = self.phone {
            draft = draft.with_phone(phone);
        }
        draft
    }
}

/// Builder for catalog item drafts
pub struct TestItemBuilder {
    sku: String,
    name: String,
    unit_price: Decimal,
    active: bool,
}

impl Default for TestItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestItemBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            sku: "SKU-001".to_string(),
            name: "Test Item".to_string(),
            unit_price: dec!(10.00),
            active: true,
        }
    }

    /// Sets the SKU
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    /// Sets the item name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the unit price
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.unit_price = price;
        self
    }

    /// Marks the item inactive
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Builds the draft
    pub fn build(self) -> NewItem {
        let draft = NewItem::new(self.sku, self.name, Money::new(self.unit_price));
        if self.active {
            draft
        } else {
            draft.inactive()
        }
    }
}

/// Builder for bill-creation requests
pub struct BillRequestBuilder {
    account: String,
    lines: Vec<BillItemRequest>,
}

impl Default for BillRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BillRequestBuilder {
    /// Creates a builder targeting the first fixture account
    pub fn new() -> Self {
        Self {
            account: IdFixtures::first_account().to_string(),
            lines: Vec::new(),
        }
    }

    /// Sets the customer account number
    pub fn for_account(mut self, account: impl Into<String>) -> Self {
        self.account = account.into();
        self
    }

    /// Appends a line to the request
    pub fn with_line(mut self, item_id: i64, qty: i64) -> Self {
        self.lines.push(BillItemRequest { item_id, qty });
        self
    }

    /// Builds the account number and line list
    pub fn build(self) -> (String, Vec<BillItemRequest>) {
        (self.account, self.lines)
    }
}
