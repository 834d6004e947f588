//! Billing DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AccountNumber, BillNumber, Money};
use domain_billing::{Bill, BillItem, BillItemRequest};

/// Request body for creating a bill
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillRequest {
    pub customer_account_number: String,
    pub items: Vec<BillLineRequest>,
}

/// One requested line: which item, how many
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLineRequest {
    pub item_id: i64,
    pub qty: i64,
}

impl From<&BillLineRequest> for BillItemRequest {
    fn from(line: &BillLineRequest) -> Self {
        BillItemRequest {
            item_id: line.item_id,
            qty: line.qty,
        }
    }
}

/// Response body for a successful bill creation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillResponse {
    pub success: bool,
    pub bill_no: BillNumber,
}

/// Full bill representation with line items
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillResponse {
    pub id: i64,
    pub bill_no: BillNumber,
    pub customer_account_number: AccountNumber,
    pub bill_date: DateTime<Utc>,
    pub total: Money,
    pub items: Vec<BillItemResponse>,
    pub created_at: DateTime<Utc>,
}

/// One priced line on a bill
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItemResponse {
    pub id: i64,
    pub item_id: i64,
    pub qty: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

impl From<Bill> for BillResponse {
    fn from(bill: Bill) -> Self {
        Self {
            id: bill.id.get(),
            bill_no: bill.bill_no,
            customer_account_number: bill.customer_account,
            bill_date: bill.bill_date,
            total: bill.total,
            items: bill.items.into_iter().map(BillItemResponse::from).collect(),
            created_at: bill.created_at,
        }
    }
}

impl From<BillItem> for BillItemResponse {
    fn from(item: BillItem) -> Self {
        Self {
            id: item.id.get(),
            item_id: item.item_id.get(),
            qty: item.qty.get(),
            unit_price: item.unit_price,
            line_total: item.line_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn create_request_accepts_camel_case() {
        let body = r#"{
            "customerAccountNumber": "ACC000005",
            "items": [{"itemId": 3, "qty": 2}]
        }"#;

        let request: CreateBillRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.customer_account_number, "ACC000005");
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].item_id, 3);
        assert_eq!(request.items[0].qty, 2);
    }

    #[test]
    fn create_response_has_success_and_bill_no() {
        let response = CreateBillResponse {
            success: true,
            bill_no: BillNumber::from_suffix(7),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["billNo"], "BILL-000007");
    }

    #[test]
    fn money_serializes_with_two_decimals() {
        let line = BillItemResponse {
            id: 1,
            item_id: 3,
            qty: 2,
            unit_price: Money::new(dec!(25.00)),
            line_total: Money::new(dec!(50.00)),
        };

        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["unitPrice"], "25.00");
        assert_eq!(json["lineTotal"], "50.00");
    }
}
