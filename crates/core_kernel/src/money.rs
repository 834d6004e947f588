//! Money with precise decimal arithmetic
//!
//! All monetary amounts in the billing system are exact two-decimal values
//! backed by rust_decimal. Binary floating point is never used, so line
//! totals and grand totals accumulate without drift.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use thiserror::Error;

/// Largest unit price the catalog accepts.
pub const MAX_UNIT_PRICE: Decimal = dec!(99999999.99);

/// Largest quantity a single bill line may carry.
pub const MAX_QUANTITY: u32 = 9999;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Quantity must be between 1 and {MAX_QUANTITY}, got {0}")]
    InvalidQuantity(i64),

    #[error("Overflow during calculation")]
    Overflow,
}

/// A monetary amount with two decimal places
///
/// Construction rounds to scale 2 (banker-unfriendly inputs are rejected at
/// the validation layer before they get here, so rounding is a formality).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Creates a new Money value, rounded to two decimal places
    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp(2))
    }

    /// Creates Money from an integer amount in cents
    pub fn from_minor(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Returns the underlying decimal amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Returns true if this amount is acceptable as a catalog unit price:
    /// strictly positive and no greater than [`MAX_UNIT_PRICE`]
    pub fn is_valid_unit_price(&self) -> bool {
        self.is_positive() && self.0 <= MAX_UNIT_PRICE
    }

    /// Checked addition, erroring on numeric overflow
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(MoneyError::Overflow)
    }

    /// Multiplies a unit price by a whole-number quantity
    ///
    /// The product of a scale-2 decimal and a whole number is exact; no
    /// rounding occurs beyond the two-decimal representation.
    pub fn times(&self, qty: Quantity) -> Result<Money, MoneyError> {
        self.0
            .checked_mul(Decimal::from(qty.get()))
            .map(Money::new)
            .ok_or(MoneyError::Overflow)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Money::new(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Money::new(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Decimal {
        money.0
    }
}

/// A bill-line quantity, guaranteed to be in `1..=MAX_QUANTITY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Validates and wraps a raw quantity
    pub fn new(qty: i64) -> Result<Self, MoneyError> {
        if qty < 1 || qty > MAX_QUANTITY as i64 {
            return Err(MoneyError::InvalidQuantity(qty));
        }
        Ok(Self(qty as u32))
    }

    /// Returns the raw quantity
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation_rounds_to_two_places() {
        let m = Money::new(dec!(100.505));
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_money_from_minor() {
        let m = Money::from_minor(10050);
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(100.00));
        let b = Money::new(dec!(50.00));

        assert_eq!((a + b).amount(), dec!(150.00));
        assert_eq!((a - b).amount(), dec!(50.00));
    }

    #[test]
    fn test_times_is_exact() {
        let price = Money::new(dec!(19.99));
        let qty = Quantity::new(3).unwrap();
        assert_eq!(price.times(qty).unwrap().amount(), dec!(59.97));
    }

    #[test]
    fn test_unit_price_bounds() {
        assert!(Money::new(dec!(0.01)).is_valid_unit_price());
        assert!(Money::new(MAX_UNIT_PRICE).is_valid_unit_price());
        assert!(!Money::ZERO.is_valid_unit_price());
        assert!(!Money::new(dec!(-5.00)).is_valid_unit_price());
        assert!(!Money::new(dec!(100000000.00)).is_valid_unit_price());
    }

    #[test]
    fn test_quantity_range() {
        assert!(Quantity::new(0).is_err());
        assert!(Quantity::new(-3).is_err());
        assert!(Quantity::new(1).is_ok());
        assert!(Quantity::new(9999).is_ok());
        assert!(Quantity::new(10000).is_err());
    }

    #[test]
    fn test_sum_of_line_totals() {
        // 19.99 x 3 + 5.00 x 2 + 100.00 x 1 = 169.97
        let lines = [
            Money::new(dec!(19.99)).times(Quantity::new(3).unwrap()).unwrap(),
            Money::new(dec!(5.00)).times(Quantity::new(2).unwrap()).unwrap(),
            Money::new(dec!(100.00)).times(Quantity::new(1).unwrap()).unwrap(),
        ];
        let total: Money = lines.into_iter().sum();
        assert_eq!(total.amount(), dec!(169.97));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn line_total_equals_repeated_addition(
            cents in 1i64..10_000_00i64,
            qty in 1u32..200u32
        ) {
            let price = Money::from_minor(cents);
            let line = price.times(Quantity::new(qty as i64).unwrap()).unwrap();

            let mut acc = Money::ZERO;
            for _ in 0..qty {
                acc = acc + price;
            }
            prop_assert_eq!(line, acc);
        }

        #[test]
        fn money_addition_is_associative(
            a in -1_000_000i64..1_000_000i64,
            b in -1_000_000i64..1_000_000i64,
            c in -1_000_000i64..1_000_000i64
        ) {
            let ma = Money::from_minor(a);
            let mb = Money::from_minor(b);
            let mc = Money::from_minor(c);

            prop_assert_eq!((ma + mb) + mc, ma + (mb + mc));
        }
    }
}
