//! Expense handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, OkResponse, MAX_PAGE_LIMIT};
use savvy_core::models::{Expense, NewExpense};

/// Query parameters for listing expenses
#[derive(Debug, Deserialize)]
pub struct ExpenseQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

/// GET /api/expenses - Paginated list of expenses
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExpenseQuery>,
) -> Result<Json<Vec<Expense>>, AppError> {
    // Input validation: clamp pagination parameters
    let limit = params.limit.max(1).min(MAX_PAGE_LIMIT);
    let skip = params.skip.max(0);

    let expenses = state
        .db
        .list_expenses(skip, limit)
        .map_err(AppError::from_core)?;

    Ok(Json(expenses))
}

/// POST /api/expenses - Add a new expense
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewExpense>,
) -> Result<Json<Expense>, AppError> {
    let created = state
        .db
        .insert_expense(&payload)
        .map_err(AppError::from_core)?;

    Ok(Json(created))
}

/// DELETE /api/expenses/:id - Delete an expense by id
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<OkResponse>, AppError> {
    state.db.delete_expense(id).map_err(AppError::from_core)?;

    Ok(Json(OkResponse { ok: true }))
}
