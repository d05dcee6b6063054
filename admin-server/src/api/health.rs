//! Health check endpoint

use axum::{Json, Router, extract::State, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();
    Json(serde_json::json!({
        "status": if database { "ok" } else { "degraded" },
        "service": "admin-server",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
    }))
}
