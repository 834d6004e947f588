//! Bill handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use domain_billing::BillItemRequest;

use crate::dto::billing::{BillResponse, CreateBillRequest, CreateBillResponse};
use crate::error::ApiError;
use crate::AppState;

/// Creates a bill atomically; on success returns the assigned bill number
pub async fn create_bill(
    State(state): State<AppState>,
    Json(request): Json<CreateBillRequest>,
) -> Result<(StatusCode, Json<CreateBillResponse>), ApiError> {
    let items: Vec<BillItemRequest> = request.items.iter().map(Into::into).collect();
    let bill_no = state
        .billing
        .create_bill(&request.customer_account_number, &items)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateBillResponse {
            success: true,
            bill_no,
        }),
    ))
}

/// Fetches a bill with its line items by bill number
pub async fn get_bill(
    State(state): State<AppState>,
    Path(bill_no): Path<String>,
) -> Result<Json<BillResponse>, ApiError> {
    let bill = state
        .billing
        .find_by_bill_number(&bill_no)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Bill not found: {bill_no}")))?;
    Ok(Json(bill.into()))
}

/// Lists a customer's bills, newest first
pub async fn list_bills_by_customer(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> Result<Json<Vec<BillResponse>>, ApiError> {
    let bills = state.billing.find_by_customer(&account).await?;
    Ok(Json(bills.into_iter().map(Into::into).collect()))
}

/// Deletes a bill and its line items; the bill number becomes reusable
pub async fn delete_bill(
    State(state): State<AppState>,
    Path(bill_no): Path<String>,
) -> Result<StatusCode, ApiError> {
    let bill = state
        .billing
        .find_by_bill_number(&bill_no)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Bill not found: {bill_no}")))?;
    state.billing.delete_bill(bill.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
