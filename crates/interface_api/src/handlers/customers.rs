//! Customer handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use core_kernel::{AccountNumber, CustomerId};

use crate::dto::customers::{CustomerRequest, CustomerResponse};
use crate::error::ApiError;
use crate::AppState;

/// Optional search parameter for the list endpoint
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
}

/// Creates a new customer; the account number is assigned server-side
pub async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    let customer = state.customers.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// Lists customers; `?q=` switches to substring search
pub async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<CustomerResponse>>, ApiError> {
    let customers = match params.q {
        Some(query) => state.customers.search(&query).await?,
        None => state.customers.list().await?,
    };
    Ok(Json(customers.into_iter().map(Into::into).collect()))
}

/// Gets a customer by surrogate id
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer = state
        .customers
        .find_by_id(CustomerId::new(id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Customer not found: {id}")))?;
    Ok(Json(customer.into()))
}

/// Gets a customer by account number
pub async fn get_customer_by_account(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let not_found = || ApiError::NotFound(format!("Customer not found: {account}"));

    let account_number: AccountNumber = account.trim().parse().map_err(|_| not_found())?;
    let customer = state
        .customers
        .find_by_account_number(&account_number)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(customer.into()))
}

/// Updates a customer's editable fields
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CustomerRequest>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer = state
        .customers
        .update(CustomerId::new(id), request.into())
        .await?;
    Ok(Json(customer.into()))
}

/// Deletes a customer
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.customers.delete(CustomerId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
