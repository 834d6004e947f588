//! Customer DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::AccountNumber;
use domain_customer::{Customer, NewCustomer};

/// Request body for creating or updating a customer
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl From<CustomerRequest> for NewCustomer {
    fn from(request: CustomerRequest) -> Self {
        NewCustomer {
            name: request.name,
            address: request.address,
            phone: request.phone,
        }
    }
}

/// Full customer representation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i64,
    pub account_number: AccountNumber,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.get(),
            account_number: customer.account_number,
            name: customer.name,
            address: customer.address,
            phone: customer.phone,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}
