//! Cart API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::error::AppResult;
use shared::models::{AbandonedCart, AddCartItem, Cart, CartLineQuery, ChangeQuantity};

use crate::state::AppState;

/// POST /api/cart/add
pub async fn add(
    State(state): State<AppState>,
    Json(payload): Json<AddCartItem>,
) -> AppResult<Json<Cart>> {
    let cart = state.ledger.add_item(payload).await?;
    Ok(Json(cart))
}

/// GET /api/cart/:email
pub async fn get(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<Cart>> {
    let cart = state.ledger.get(&email).await?;
    Ok(Json(cart))
}

/// PUT /api/cart/:email/:item_id
pub async fn change_quantity(
    State(state): State<AppState>,
    Path((email, item_id)): Path<(String, i64)>,
    Json(payload): Json<ChangeQuantity>,
) -> AppResult<Json<Cart>> {
    let cart = state
        .ledger
        .change_quantity(&email, item_id, payload.item_type, payload.change)
        .await?;
    Ok(Json(cart))
}

/// DELETE /api/cart/:email/:item_id?item_type=
pub async fn remove(
    State(state): State<AppState>,
    Path((email, item_id)): Path<(String, i64)>,
    Query(query): Query<CartLineQuery>,
) -> AppResult<Json<Cart>> {
    let cart = state
        .ledger
        .remove_item(&email, item_id, query.item_type)
        .await?;
    Ok(Json(cart))
}

/// DELETE /api/cart/:email
pub async fn abandon(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<AbandonedCart>> {
    let released = state.ledger.abandon(&email).await?;
    Ok(Json(AbandonedCart { released }))
}
