//! API routes for admin-server
//!
//! | Path | Auth |
//! |------|------|
//! | /health | none |
//! | /api/admin/login | none |
//! | /api/admin/menu, /api/admin/tables, /api/admin/event-halls, /api/admin/offers | Bearer |

pub mod event_halls;
pub mod health;
pub mod login;
pub mod menu;
pub mod offers;
pub mod tables;

use axum::{Router, middleware};
use dine_store::RepoError;
use shared::error::{AppError, ErrorCode};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::admin_auth_middleware;
use crate::state::AppState;

/// Build the full application router
pub fn build_app(state: AppState) -> Router {
    let timeout = state.config.request_timeout;

    let protected = Router::new()
        .merge(menu::router())
        .merge(tables::router())
        .merge(event_halls::router())
        .merge(offers::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ));

    Router::new()
        .merge(health::router())
        .merge(login::router())
        .merge(protected)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Map repository errors onto the resource's own not-found and name-conflict codes
pub(crate) fn resource_error(err: RepoError, not_found: ErrorCode, exists: ErrorCode) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::with_message(not_found, msg),
        RepoError::Duplicate(msg) => AppError::with_message(exists, msg),
        other => other.into(),
    }
}
