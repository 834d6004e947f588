//! Identifiers for domain entities
//!
//! Two kinds of identifier exist in the system:
//!
//! - **Surrogate ids**: database-assigned integers, wrapped in newtypes so a
//!   `CustomerId` can never be passed where an `ItemId` is expected.
//! - **External numbers**: stable, human-readable strings shown to users and
//!   stored as foreign references (`ACC000005`, `BILL-000042`). These are
//!   derived once and immutable thereafter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

macro_rules! define_surrogate_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database id
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw id
            pub fn get(&self) -> i64 {
                self.0
            }

            /// Returns true for ids that could have been assigned by the store
            pub fn is_persisted(&self) -> bool {
                self.0 > 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_surrogate_id!(CustomerId);
define_surrogate_id!(ItemId);
define_surrogate_id!(BillId);
define_surrogate_id!(BillItemId);

/// Stable external identifier for a customer: `ACC` + 6-digit zero-padded
/// sequence derived from the surrogate id at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

impl AccountNumber {
    const PREFIX: &'static str = "ACC";

    /// Derives the account number for a freshly assigned customer id
    pub fn from_id(id: CustomerId) -> Self {
        Self(format!("{}{:06}", Self::PREFIX, id.get()))
    }

    /// Returns the account number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountNumber {
    type Err = CoreError;

    // Zero padding targets 6 digits; ids past 999999 format wider, so the
    // parse accepts 6 digits or more and stays round-trippable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| CoreError::invalid_identifier("account number", s))?;
        if digits.len() >= 6 && digits.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(CoreError::invalid_identifier("account number", s))
        }
    }
}

/// Stable external identifier for a bill: `BILL-` + 6-digit zero-padded
/// numeric suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillNumber(String);

impl BillNumber {
    const PREFIX: &'static str = "BILL-";

    /// Builds a bill number from its numeric suffix
    ///
    /// Suffixes are zero-padded to 6 digits; larger suffixes format wider
    /// and remain parseable.
    pub fn from_suffix(suffix: u32) -> Self {
        Self(format!("{}{:06}", Self::PREFIX, suffix))
    }

    /// Returns the numeric suffix
    pub fn suffix(&self) -> u32 {
        // Format is validated on construction, so the suffix always parses.
        self.0[Self::PREFIX.len()..].parse().unwrap_or(0)
    }

    /// Returns the bill number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BillNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BillNumber {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| CoreError::invalid_identifier("bill number", s))?;
        if digits.len() >= 6 && digits.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(CoreError::invalid_identifier("bill number", s))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_number_from_id() {
        let acc = AccountNumber::from_id(CustomerId::new(5));
        assert_eq!(acc.as_str(), "ACC000005");
    }

    #[test]
    fn test_account_number_parsing() {
        assert!("ACC000001".parse::<AccountNumber>().is_ok());
        assert!("ACC1".parse::<AccountNumber>().is_err());
        assert!("ACX000001".parse::<AccountNumber>().is_err());
        assert!("ACC00000A".parse::<AccountNumber>().is_err());
    }

    #[test]
    fn test_bill_number_round_trip() {
        let no = BillNumber::from_suffix(42);
        assert_eq!(no.as_str(), "BILL-000042");
        assert_eq!(no.suffix(), 42);

        let parsed: BillNumber = "BILL-000042".parse().unwrap();
        assert_eq!(parsed, no);
    }

    #[test]
    fn test_bill_number_rejects_malformed() {
        assert!("BILL-42".parse::<BillNumber>().is_err());
        assert!("INV-000042".parse::<BillNumber>().is_err());
        assert!("BILL-00004X".parse::<BillNumber>().is_err());
    }

    #[test]
    fn test_numbers_past_the_padded_range_round_trip() {
        let no = BillNumber::from_suffix(1_000_000);
        assert_eq!(no.as_str(), "BILL-1000000");
        assert_eq!(no.suffix(), 1_000_000);
        let parsed: BillNumber = no.as_str().parse().unwrap();
        assert_eq!(parsed, no);

        let acc = AccountNumber::from_id(CustomerId::new(1_000_000));
        assert_eq!(acc.as_str(), "ACC1000000");
        let parsed: AccountNumber = acc.as_str().parse().unwrap();
        assert_eq!(parsed, acc);
    }

    #[test]
    fn test_surrogate_ids_distinct_types() {
        let customer = CustomerId::new(7);
        let item = ItemId::new(7);
        assert_eq!(customer.get(), item.get());
        assert!(customer.is_persisted());
        assert!(!CustomerId::new(0).is_persisted());
    }
}
