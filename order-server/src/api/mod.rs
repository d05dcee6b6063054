//! API routes for order-server
//!
//! - [`health`] - liveness
//! - [`cart`] - cart ledger and reservations
//! - [`orders`] - checkout and history
//! - [`users`] - customer accounts and password recovery
//! - [`catalog`] - read-only menu, tables, event halls and offers

pub mod cart;
pub mod catalog;
pub mod health;
pub mod orders;
pub mod users;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router
pub fn build_app(state: AppState) -> Router {
    let timeout = state.config.request_timeout;

    Router::new()
        .merge(health::router())
        .merge(cart::router())
        .merge(orders::router())
        .merge(users::router())
        .merge(catalog::router())
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
