//! Catalog handlers
//!
//! Entries whose stored price no longer normalizes are left out of listings.

use axum::{
    Json,
    extract::{Path, State},
};
use dine_store::repository::{dining_table, event_hall, menu_item, offer};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DiningTable, EventHall, MenuItemView, OfferView};

use crate::state::AppState;

/// GET /api/menu
pub async fn list_menu(State(state): State<AppState>) -> AppResult<Json<Vec<MenuItemView>>> {
    let items = menu_item::find_all(&state.pool).await?;
    let views = items
        .iter()
        .filter_map(|item| match item.to_view() {
            Ok(view) => Some(view),
            Err(e) => {
                tracing::warn!(id = item.id, price = %item.price, error = %e, "Skipping menu item with invalid price");
                None
            }
        })
        .collect();
    Ok(Json(views))
}

/// GET /api/menu/:id
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItemView>> {
    let item = menu_item::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id))?;
    let view = item.to_view()?;
    Ok(Json(view))
}

/// GET /api/tables
pub async fn list_tables(State(state): State<AppState>) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = dining_table::find_all(&state.pool).await?;
    Ok(Json(tables))
}

/// GET /api/event-halls
pub async fn list_event_halls(State(state): State<AppState>) -> AppResult<Json<Vec<EventHall>>> {
    let halls = event_hall::find_all(&state.pool).await?;
    Ok(Json(halls))
}

/// GET /api/offers
pub async fn list_offers(State(state): State<AppState>) -> AppResult<Json<Vec<OfferView>>> {
    let offers = offer::find_all(&state.pool).await?;
    let views = offers
        .iter()
        .filter_map(|o| match o.to_view() {
            Ok(view) => Some(view),
            Err(e) => {
                tracing::warn!(id = o.id, error = %e, "Skipping offer with invalid price");
                None
            }
        })
        .collect();
    Ok(Json(views))
}
