//! Event Hall API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use dine_store::repository::event_hall;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{EventHall, EventHallCreate, EventHallUpdate};
use validator::Validate;

use super::super::resource_error;
use crate::state::AppState;

fn hall_error(err: dine_store::RepoError) -> AppError {
    resource_error(err, ErrorCode::EventHallNotFound, ErrorCode::EventHallNameExists)
}

/// GET /api/admin/event-halls
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<EventHall>>> {
    let halls = event_hall::find_all(&state.pool).await?;
    Ok(Json(halls))
}

/// GET /api/admin/event-halls/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EventHall>> {
    let hall = event_hall::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EventHallNotFound).with_detail("id", id))?;
    Ok(Json(hall))
}

/// POST /api/admin/event-halls
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<EventHallCreate>,
) -> AppResult<Json<EventHall>> {
    payload.validate()?;
    let hall = event_hall::create(&state.pool, payload)
        .await
        .map_err(hall_error)?;
    tracing::info!(id = hall.id, name = %hall.name, "Event hall created");
    Ok(Json(hall))
}

/// PUT /api/admin/event-halls/:id
///
/// Setting `available` here overrides the booking flag, e.g. after an event ends.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<EventHallUpdate>,
) -> AppResult<Json<EventHall>> {
    payload.validate()?;
    let hall = event_hall::update(&state.pool, id, payload)
        .await
        .map_err(hall_error)?;
    tracing::info!(id, available = hall.available, "Event hall updated");
    Ok(Json(hall))
}

/// DELETE /api/admin/event-halls/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    if !event_hall::delete(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::EventHallNotFound).with_detail("id", id));
    }
    tracing::info!(id, "Event hall deleted");
    Ok(Json(true))
}
