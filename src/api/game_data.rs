//! Reference lists: classes and races

use axum::{routing::get, Json, Router};
use serde::Serialize;

use super::AppState;
use crate::catalog::{Class, Race};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/classes", get(classes))
        .route("/races", get(races))
}

#[derive(Debug, Serialize)]
pub struct ClassesResponse {
    pub classes: Vec<Class>,
}

#[derive(Debug, Serialize)]
pub struct RacesResponse {
    pub races: Vec<Race>,
}

async fn classes() -> Json<ClassesResponse> {
    Json(ClassesResponse {
        classes: Class::ALL.to_vec(),
    })
}

async fn races() -> Json<RacesResponse> {
    Json(RacesResponse {
        races: Race::ALL.to_vec(),
    })
}
