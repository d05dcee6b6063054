//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::AppResult;
use shared::models::{Order, PlaceOrder};

use crate::state::AppState;

/// POST /api/orders
pub async fn place(
    State(state): State<AppState>,
    Json(payload): Json<PlaceOrder>,
) -> AppResult<Json<Order>> {
    let order = state.orders.place_order(&payload.email).await?;
    Ok(Json(order))
}

/// GET /api/orders/:email
pub async fn list(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders.orders_for(&email).await?;
    Ok(Json(orders))
}
