//! Stay endpoints
//!
//! Stays expose list and create only; with no PUT there is no PATCH to
//! synthesize.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::StayRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{NewStay, Stay};

/// Query filters for stay listing
#[derive(Debug, Default, Deserialize)]
pub struct StayListParams {
    pub user_id: Option<i32>,
}

/// GET /stays - list stays, optionally for one user
async fn list_stays(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StayListParams>,
) -> Result<Json<Vec<Stay>>, ApiError> {
    let stays = StayRepo::new(&state.pool).list(params.user_id).await?;
    Ok(Json(stays))
}

/// POST /stays - record a stay
async fn create_stay(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewStay>,
) -> Result<(StatusCode, Json<Stay>), ApiError> {
    req.validate()?;
    let stay = StayRepo::new(&state.pool).create(&req).await?;
    Ok((StatusCode::CREATED, Json(stay)))
}

/// Stay routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/stays", get(list_stays).post(create_stay))
}
