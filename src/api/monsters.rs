//! Monster endpoints

use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::catalog::{Monster, MonsterFilter, MonsterType, Pagination, Size};
use crate::generate::{self, MonsterOptions};

/// Build monster router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/monsters", get(list))
        .route("/monsters/random", get(random))
        .route("/monsters/{id}", get(by_id))
}

/// Monster list query
#[derive(Debug, Default, Deserialize)]
pub struct MonsterQuery {
    #[serde(rename = "type")]
    pub monster_type: Option<MonsterType>,
    pub size: Option<Size>,
    pub min_cr: Option<f64>,
    pub max_cr: Option<f64>,
    pub name: Option<String>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

/// One page of monsters
#[derive(Debug, Serialize)]
pub struct MonstersResponse {
    pub monsters: Vec<Monster>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

fn check_cr(field: &str, cr: Option<f64>) -> Result<(), ApiError> {
    match cr {
        Some(cr) if !cr.is_finite() || cr < 0.0 => Err(ApiError::Unprocessable(format!(
            "{} must be a non-negative number",
            field
        ))),
        _ => Ok(()),
    }
}

/// List monsters with optional filters
async fn list(
    State(state): State<AppState>,
    query: Result<Query<MonsterQuery>, QueryRejection>,
) -> Result<Json<MonstersResponse>, ApiError> {
    let Query(query) = query?;
    check_cr("min_cr", query.min_cr)?;
    check_cr("max_cr", query.max_cr)?;
    let pagination = Pagination::new(query.skip, query.limit).map_err(ApiError::Unprocessable)?;
    let filter = MonsterFilter {
        monster_type: query.monster_type,
        size: query.size,
        min_cr: query.min_cr,
        max_cr: query.max_cr,
        name: query.name,
    };

    let page = state.catalog.find_monsters(&filter, pagination);
    Ok(Json(MonstersResponse {
        monsters: page.items,
        total: page.total,
        skip: pagination.skip,
        limit: pagination.limit,
    }))
}

/// Generate a random monster within optional constraints
async fn random(
    options: Result<Query<MonsterOptions>, QueryRejection>,
) -> Result<Json<Monster>, ApiError> {
    let Query(options) = options?;
    check_cr("min_cr", options.min_cr)?;
    check_cr("max_cr", options.max_cr)?;

    Ok(Json(generate::random_monster(&mut rand::rng(), &options)))
}

/// Get one monster by id
async fn by_id(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<Monster>, ApiError> {
    let Path(id) = id?;
    state
        .catalog
        .monster(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Monster", id))
}
