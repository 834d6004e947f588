//! Customer field validation rules
//!
//! # Rules
//!
//! - Name: required, at most 100 characters
//! - Address: optional, at most 500 characters
//! - Phone: optional, at most 20 characters, digits plus `+ - ( )` and spaces

use crate::customer::NewCustomer;
use crate::error::CustomerError;

const MAX_NAME_LEN: usize = 100;
const MAX_ADDRESS_LEN: usize = 500;
const MAX_PHONE_LEN: usize = 20;

/// Validates a customer draft, returning the first violation
pub fn validate(customer: &NewCustomer) -> Result<(), CustomerError> {
    let name = customer.name.trim();
    if name.is_empty() {
        return Err(CustomerError::validation("Customer name is required"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CustomerError::validation(format!(
            "Customer name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }

    if let Some(address) = &customer.address {
        if address.chars().count() > MAX_ADDRESS_LEN {
            return Err(CustomerError::validation(format!(
                "Address cannot exceed {MAX_ADDRESS_LEN} characters"
            )));
        }
    }

    if let Some(phone) = &customer.phone {
        let phone = phone.trim();
        if !phone.is_empty() {
            if phone.chars().count() > MAX_PHONE_LEN {
                return Err(CustomerError::validation(format!(
                    "Phone number cannot exceed {MAX_PHONE_LEN} characters"
                )));
            }
            if !phone
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '(' | ')'))
            {
                return Err(CustomerError::validation(
                    "Phone number contains invalid characters",
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_customer() {
        let draft = NewCustomer::new("Nimal Perera")
            .with_address("12 Galle Road, Colombo")
            .with_phone("+94 (11) 234-5678");
        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn test_name_required() {
        assert!(validate(&NewCustomer::new("")).is_err());
        assert!(validate(&NewCustomer::new("   ")).is_err());
    }

    #[test]
    fn test_name_length_cap() {
        let long = "x".repeat(101);
        assert!(validate(&NewCustomer::new(long)).is_err());
        assert!(validate(&NewCustomer::new("x".repeat(100))).is_ok());
    }

    #[test]
    fn test_phone_charset() {
        let bad = NewCustomer::new("A").with_phone("call-me@home");
        assert!(validate(&bad).is_err());

        let good = NewCustomer::new("A").with_phone("011 2345678");
        assert!(validate(&good).is_ok());
    }

    #[test]
    fn test_address_length_cap() {
        let bad = NewCustomer::new("A").with_address("y".repeat(501));
        assert!(validate(&bad).is_err());
    }
}
