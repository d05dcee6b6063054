//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use dine_store::repository::dining_table;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use validator::Validate;

use super::super::resource_error;
use crate::state::AppState;

fn table_error(err: dine_store::RepoError) -> AppError {
    resource_error(err, ErrorCode::TableNotFound, ErrorCode::TableNameExists)
}

/// GET /api/admin/tables
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = dining_table::find_all(&state.pool).await?;
    Ok(Json(tables))
}

/// GET /api/admin/tables/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiningTable>> {
    let table = dining_table::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound).with_detail("id", id))?;
    Ok(Json(table))
}

/// POST /api/admin/tables
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    payload.validate()?;
    let table = dining_table::create(&state.pool, payload)
        .await
        .map_err(table_error)?;
    tracing::info!(id = table.id, name = %table.name, "Table created");
    Ok(Json(table))
}

/// PUT /api/admin/tables/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    payload.validate()?;
    let table = dining_table::update(&state.pool, id, payload)
        .await
        .map_err(table_error)?;
    tracing::info!(id, "Table updated");
    Ok(Json(table))
}

/// DELETE /api/admin/tables/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    if !dining_table::delete(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::TableNotFound).with_detail("id", id));
    }
    tracing::info!(id, "Table deleted");
    Ok(Json(true))
}
