//! Admin login

use axum::{Json, Router, extract::State, routing::post};
use shared::error::AppResult;
use shared::models::{AdminLoginRequest, AdminLoginResponse};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/admin/login", post(login))
}

/// POST /api/admin/login
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLoginRequest>,
) -> AppResult<Json<AdminLoginResponse>> {
    let response = crate::auth::login(&state.pool, state.jwt_secret(), payload).await?;
    Ok(Json(response))
}
