//! Character endpoints

use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::catalog::{Character, CharacterFilter, Class, Pagination, Race};
use crate::generate;

/// Build character router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/characters", get(list))
        .route("/characters/random", get(random))
        .route("/characters/{id}", get(by_id))
}

/// Character list query
#[derive(Debug, Default, Deserialize)]
pub struct CharacterQuery {
    pub class: Option<Class>,
    pub race: Option<Race>,
    pub name: Option<String>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

/// One page of characters
#[derive(Debug, Serialize)]
pub struct CharactersResponse {
    pub characters: Vec<Character>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

/// List characters with optional filters
async fn list(
    State(state): State<AppState>,
    query: Result<Query<CharacterQuery>, QueryRejection>,
) -> Result<Json<CharactersResponse>, ApiError> {
    let Query(query) = query?;
    let pagination = Pagination::new(query.skip, query.limit).map_err(ApiError::Unprocessable)?;
    let filter = CharacterFilter {
        class: query.class,
        race: query.race,
        name: query.name,
    };

    let page = state.catalog.find_characters(&filter, pagination);
    Ok(Json(CharactersResponse {
        characters: page.items,
        total: page.total,
        skip: pagination.skip,
        limit: pagination.limit,
    }))
}

/// Generate a random character
async fn random() -> Json<Character> {
    Json(generate::random_character(&mut rand::rng()))
}

/// Get one character by id
async fn by_id(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<Character>, ApiError> {
    let Path(id) = id?;
    state
        .catalog
        .character(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Character", id))
}
