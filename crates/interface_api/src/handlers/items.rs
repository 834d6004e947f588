//! Catalog item handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use core_kernel::ItemId;

use crate::dto::items::{ItemRequest, ItemResponse};
use crate::error::ApiError;
use crate::AppState;

/// Optional search parameter for the list endpoint
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
}

/// Creates a catalog item; the SKU must be unused
pub async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<ItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let item = state.catalog.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Lists items; `?q=` switches to substring search over SKU and name
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let items = match params.q {
        Some(query) => state.catalog.search(&query).await?,
        None => state.catalog.list().await?,
    };
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Gets an item by surrogate id
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = state
        .catalog
        .find_by_id(ItemId::new(id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Item not found: {id}")))?;
    Ok(Json(item.into()))
}

/// Gets an item by SKU
pub async fn get_item_by_sku(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = state
        .catalog
        .find_by_sku(&sku)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Item not found: {sku}")))?;
    Ok(Json(item.into()))
}

/// Updates an item; a changed SKU must not collide with another item
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<ItemRequest>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = state.catalog.update(ItemId::new(id), request.into()).await?;
    Ok(Json(item.into()))
}

/// Marks an item inactive without removing it
pub async fn deactivate_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = state.catalog.deactivate(ItemId::new(id)).await?;
    Ok(Json(item.into()))
}

/// Hard-deletes an item
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete(ItemId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
