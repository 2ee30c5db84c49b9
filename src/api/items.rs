//! Item endpoints

use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::catalog::{Item, ItemFilter, ItemType, Pagination, Rarity};

/// Build item router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", get(list))
        .route("/items/{id}", get(by_id))
}

/// Item list query
#[derive(Debug, Default, Deserialize)]
pub struct ItemQuery {
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
    pub rarity: Option<Rarity>,
    pub magic: Option<bool>,
    pub attunement: Option<bool>,
    pub min_cost: Option<u32>,
    pub max_cost: Option<u32>,
    pub name: Option<String>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

/// One page of items
#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: Vec<Item>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

/// List items with optional filters
async fn list(
    State(state): State<AppState>,
    query: Result<Query<ItemQuery>, QueryRejection>,
) -> Result<Json<ItemsResponse>, ApiError> {
    let Query(query) = query?;
    let pagination = Pagination::new(query.skip, query.limit).map_err(ApiError::Unprocessable)?;
    let filter = ItemFilter {
        item_type: query.item_type,
        rarity: query.rarity,
        magic: query.magic,
        attunement: query.attunement,
        min_cost: query.min_cost,
        max_cost: query.max_cost,
        name: query.name,
    };

    let page = state.catalog.find_items(&filter, pagination);
    Ok(Json(ItemsResponse {
        items: page.items,
        total: page.total,
        skip: pagination.skip,
        limit: pagination.limit,
    }))
}

/// Get one item by id
async fn by_id(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<Item>, ApiError> {
    let Path(id) = id?;
    state
        .catalog
        .item(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Item", id))
}
