//! Customer entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AccountNumber, CustomerId};

/// A customer record
///
/// The account number is assigned by the store at creation time, after the
/// surrogate id is known, and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Internal surrogate id
    pub id: CustomerId,
    /// Stable external identifier (`ACC000005`)
    pub account_number: AccountNumber,
    /// Customer name
    pub name: String,
    /// Postal address
    pub address: Option<String>,
    /// Phone number
    pub phone: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// Field data for creating or updating a customer
///
/// The store assigns id and account number; callers only supply the
/// editable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl NewCustomer {
    /// Creates a new customer draft with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            phone: None,
        }
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
}
