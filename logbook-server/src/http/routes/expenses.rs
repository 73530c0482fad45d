//! Expense endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use crate::db::ExpenseRepo;
use crate::http::error::ApiError;
use crate::http::patch;
use crate::http::server::AppState;
use crate::models::{Expense, NewExpense};

/// Query filters for expense listing
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseListParams {
    pub user_id: Option<i32>,
    pub city_id: Option<i32>,
}

/// GET /expenses - list expenses, optionally filtered
async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExpenseListParams>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    let expenses = ExpenseRepo::new(&state.pool)
        .list(params.user_id, params.city_id)
        .await?;
    Ok(Json(expenses))
}

/// POST /expenses - create a new expense
async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewExpense>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    req.validate()?;
    let expense = ExpenseRepo::new(&state.pool).create(&req).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// GET /expenses/{id} - get a single expense
async fn get_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Expense>, ApiError> {
    let expense = ExpenseRepo::new(&state.pool).get(id).await?;
    Ok(Json(expense))
}

/// PUT /expenses/{id} - replace an expense
async fn update_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<NewExpense>,
) -> Result<Json<Expense>, ApiError> {
    req.validate()?;
    let expense = ExpenseRepo::new(&state.pool).update(id, &req).await?;
    Ok(Json(expense))
}

/// PATCH /expenses/{id} - synthesized from GET + PUT via merge patch
async fn patch_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Expense>, ApiError> {
    let repo = ExpenseRepo::new(&state.pool);
    let current = repo.get(id).await?;

    let merged: NewExpense = patch::apply(&NewExpense::from(&current), &body)?;
    merged.validate()?;

    let expense = repo.update(id, &merged).await?;
    Ok(Json(expense))
}

/// DELETE /expenses/{id} - delete an expense
async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    ExpenseRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Expense routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route(
            "/expenses/{id}",
            get(get_expense)
                .put(update_expense)
                .patch(patch_expense)
                .delete(delete_expense),
        )
}
