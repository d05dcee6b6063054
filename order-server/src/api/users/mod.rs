//! Customer account API

mod handler;

use axum::{Router, routing::post};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/send-code", post(handler::send_code))
        .route("/verify-code", post(handler::verify_code))
        .route("/reset-password", post(handler::reset_password))
}
