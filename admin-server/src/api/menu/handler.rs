//! Menu Item API Handlers
//!
//! Prices are stored as submitted but must normalize to a positive amount.

use axum::{
    Json,
    extract::{Path, State},
};
use dine_store::repository::menu_item::{self, NewMenuItem};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::normalize_price;
use validator::Validate;

use super::super::resource_error;
use crate::state::AppState;

fn menu_error(err: dine_store::RepoError) -> AppError {
    resource_error(err, ErrorCode::MenuItemNotFound, ErrorCode::MenuItemNameExists)
}

/// GET /api/admin/menu
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<MenuItem>>> {
    let items = menu_item::find_all(&state.pool).await?;
    Ok(Json(items))
}

/// GET /api/admin/menu/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    let item = menu_item::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id))?;
    Ok(Json(item))
}

/// POST /api/admin/menu
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    payload.validate()?;
    normalize_price(&payload.price)?;

    let item = menu_item::create(
        &state.pool,
        NewMenuItem {
            name: payload.name.trim().to_string(),
            category: payload.category.trim().to_string(),
            price: payload.price.to_raw(),
            stock_quantity: payload.stock_quantity,
            image: payload.image,
        },
    )
    .await
    .map_err(menu_error)?;

    tracing::info!(id = item.id, name = %item.name, "Menu item created");
    Ok(Json(item))
}

/// PUT /api/admin/menu/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    payload.validate()?;
    let price = match &payload.price {
        Some(price) => {
            normalize_price(price)?;
            Some(price.to_raw())
        }
        None => None,
    };

    let item = menu_item::update(&state.pool, id, payload, price)
        .await
        .map_err(menu_error)?;

    tracing::info!(id, "Menu item updated");
    Ok(Json(item))
}

/// DELETE /api/admin/menu/:id - also removes its offer
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    if !menu_item::delete(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id));
    }
    tracing::info!(id, "Menu item deleted");
    Ok(Json(true))
}
