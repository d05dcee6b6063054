//! Offer API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use dine_store::repository::{menu_item, offer};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Offer, OfferCreate, OfferUpdate};
use shared::{PriceValue, normalize_price};

use super::super::resource_error;
use crate::state::AppState;

fn offer_error(err: dine_store::RepoError) -> AppError {
    resource_error(err, ErrorCode::OfferNotFound, ErrorCode::OfferExists)
}

/// The discounted price must normalize and be strictly below `original`
fn check_discount(discounted: &PriceValue, original: f64) -> AppResult<()> {
    let value = normalize_price(discounted)?;
    if value >= original {
        return Err(AppError::validation(format!(
            "Discounted price {value} must be below the original price {original}"
        ))
        .with_detail("original_price", original)
        .with_detail("discounted_price", value));
    }
    Ok(())
}

/// GET /api/admin/offers
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Offer>>> {
    let offers = offer::find_all(&state.pool).await?;
    Ok(Json(offers))
}

/// GET /api/admin/offers/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Offer>> {
    let found = offer::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OfferNotFound).with_detail("id", id))?;
    Ok(Json(found))
}

/// POST /api/admin/offers
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<OfferCreate>,
) -> AppResult<Json<Offer>> {
    let item = menu_item::find_by_id(&state.pool, payload.menu_item_id)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", payload.menu_item_id)
        })?;
    let original = item.unit_price()?;
    check_discount(&payload.discounted_price, original)?;

    let created = offer::create(
        &state.pool,
        item.id,
        &item.name,
        original,
        &payload.discounted_price.to_raw(),
    )
    .await
    .map_err(offer_error)?;

    tracing::info!(id = created.id, menu_item_id = item.id, "Offer created");
    Ok(Json(created))
}

/// PUT /api/admin/offers/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<OfferUpdate>,
) -> AppResult<Json<Offer>> {
    let existing = offer::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OfferNotFound).with_detail("id", id))?;
    check_discount(&payload.discounted_price, existing.original_price)?;

    let updated = offer::update_discount(&state.pool, id, &payload.discounted_price.to_raw())
        .await
        .map_err(offer_error)?;

    tracing::info!(id, "Offer updated");
    Ok(Json(updated))
}

/// DELETE /api/admin/offers/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    if !offer::delete(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::OfferNotFound).with_detail("id", id));
    }
    tracing::info!(id, "Offer deleted");
    Ok(Json(true))
}
