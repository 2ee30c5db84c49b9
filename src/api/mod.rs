//! HTTP API module - REST endpoints

mod characters;
mod combat;
mod error;
mod game_data;
mod items;
mod monsters;

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::combat::{DieRoller, RandomRoller};

pub use combat::{
    AttackRollRequest, CombatRequest, DamageRollRequest, SavingThrowRequest, MAX_BONUS,
    MAX_DICE_COUNT, MAX_DIE_SIZE,
};
pub use error::{ApiError, ErrorResponse};

/// Versioned prefix for every resource route
pub const API_PREFIX: &str = "/api/v1";

/// Produces a fresh die roller for each request
pub type RollerFactory = Arc<dyn Fn() -> Box<dyn DieRoller + Send> + Send + Sync>;

/// Rollers backed by an entropy-seeded RNG
pub fn random_rollers() -> RollerFactory {
    Arc::new(|| Box::new(RandomRoller::from_entropy()) as Box<dyn DieRoller + Send>)
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub rollers: RollerFactory,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, rollers: RollerFactory) -> Self {
        Self { catalog, rollers }
    }

    /// A roller for one request
    pub fn roller(&self) -> Box<dyn DieRoller + Send> {
        (self.rollers)()
    }
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    let v1 = Router::new()
        .merge(characters::router())
        .merge(monsters::router())
        .merge(items::router())
        .merge(game_data::router())
        .merge(combat::router());

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(root))
        .nest(API_PREFIX, v1)
        .with_state(state)
}

/// Root endpoint
async fn root() -> impl IntoResponse {
    Json(RootResponse {
        name: "grimoire",
        version: env!("CARGO_PKG_VERSION"),
        message: "Welcome to the D&D API",
    })
}

#[derive(Serialize)]
struct RootResponse {
    name: &'static str,
    version: &'static str,
    message: &'static str,
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        catalog: CatalogCounts {
            characters: state.catalog.characters().len(),
            monsters: state.catalog.monsters().len(),
            items: state.catalog.items().len(),
        },
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    catalog: CatalogCounts,
}

#[derive(Serialize)]
struct CatalogCounts {
    characters: usize,
    monsters: usize,
    items: usize,
}
