//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful error
//! messages than bare `assert_eq!`.

use core_kernel::Money;
use domain_billing::Bill;
use rust_decimal::Decimal;

/// Asserts that a Money value equals the expected decimal amount
pub fn assert_money_eq(actual: Money, expected: Decimal) {
    assert_eq!(
        actual.amount(),
        expected,
        "Money mismatch: actual={}, expected={}",
        actual.amount(),
        expected
    );
}

/// Asserts a bill's internal arithmetic is consistent
///
/// Every line total must equal unit price times quantity, and the grand
/// total must equal the exact sum of line totals.
pub fn assert_bill_balanced(bill: &Bill) {
    for line in &bill.items {
        let expected = line
            .unit_price
            .times(line.qty)
            .expect("line arithmetic overflow");
        assert_eq!(
            line.line_total, expected,
            "Line {} total {} != {} x {}",
            line.id, line.line_total, line.unit_price, line.qty
        );
    }

    let line_sum: Money = bill.items.iter().map(|i| i.line_total).sum();
    assert_eq!(
        bill.total, line_sum,
        "Bill {} total {} != sum of line totals {}",
        bill.bill_no, bill.total, line_sum
    );
}

/// Asserts that a bill number has the canonical `BILL-` + digits shape,
/// zero-padded to at least 6 digits
pub fn assert_bill_number_shape(bill_no: &str) {
    let digits = bill_no
        .strip_prefix("BILL-")
        .unwrap_or_else(|| panic!("Bill number '{}' missing BILL- prefix", bill_no));
    assert!(
        digits.len() >= 6 && digits.bytes().all(|b| b.is_ascii_digit()),
        "Bill number '{}' suffix is not at least 6 digits",
        bill_no
    );
}
