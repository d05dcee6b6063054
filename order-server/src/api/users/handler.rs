//! Customer account handlers

use axum::{Json, extract::State};
use serde_json::{Value, json};
use shared::error::AppResult;
use shared::models::{
    LoginRequest, RegisterRequest, ResetPasswordRequest, SendCodeRequest, UserProfile,
    VerifyCodeRequest,
};

use crate::state::AppState;

/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<UserProfile>> {
    let profile = state.accounts.register(payload).await?;
    Ok(Json(profile))
}

/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<UserProfile>> {
    let profile = state.accounts.login(payload).await?;
    Ok(Json(profile))
}

/// POST /api/users/send-code
pub async fn send_code(
    State(state): State<AppState>,
    Json(payload): Json<SendCodeRequest>,
) -> AppResult<Json<Value>> {
    state.accounts.send_code(payload).await?;
    // Same answer whether or not the account exists
    Ok(Json(json!({
        "message": "If the email is registered, a verification code has been sent"
    })))
}

/// POST /api/users/verify-code
pub async fn verify_code(
    State(state): State<AppState>,
    Json(payload): Json<VerifyCodeRequest>,
) -> AppResult<Json<Value>> {
    state.accounts.verify_code(payload).await?;
    Ok(Json(json!({ "message": "Verification code accepted" })))
}

/// POST /api/users/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> AppResult<Json<Value>> {
    state.accounts.reset_password(payload).await?;
    Ok(Json(json!({ "message": "Password has been reset" })))
}
