//! City endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::db::CityRepo;
use crate::http::error::ApiError;
use crate::http::patch;
use crate::http::server::AppState;
use crate::models::{City, NewCity};

/// GET /cities - list all cities
async fn list_cities(State(state): State<Arc<AppState>>) -> Result<Json<Vec<City>>, ApiError> {
    let cities = CityRepo::new(&state.pool).list().await?;
    Ok(Json(cities))
}

/// POST /cities - create a new city
async fn create_city(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewCity>,
) -> Result<(StatusCode, Json<City>), ApiError> {
    req.validate()?;
    let city = CityRepo::new(&state.pool).create(&req).await?;
    Ok((StatusCode::CREATED, Json(city)))
}

/// GET /cities/{id} - get a single city
async fn get_city(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<City>, ApiError> {
    let city = CityRepo::new(&state.pool).get(id).await?;
    Ok(Json(city))
}

/// PUT /cities/{id} - replace a city
async fn update_city(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<NewCity>,
) -> Result<Json<City>, ApiError> {
    req.validate()?;
    let city = CityRepo::new(&state.pool).update(id, &req).await?;
    Ok(Json(city))
}

/// PATCH /cities/{id} - synthesized from GET + PUT via merge patch
async fn patch_city(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> Result<Json<City>, ApiError> {
    let repo = CityRepo::new(&state.pool);
    let current = repo.get(id).await?;

    let merged: NewCity = patch::apply(&NewCity::from(&current), &body)?;
    merged.validate()?;

    let city = repo.update(id, &merged).await?;
    Ok(Json(city))
}

/// DELETE /cities/{id} - delete a city
async fn delete_city(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    CityRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// City routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cities", get(list_cities).post(create_city))
        .route(
            "/cities/{id}",
            get(get_city)
                .put(update_city)
                .patch(patch_city)
                .delete(delete_city),
        )
}
