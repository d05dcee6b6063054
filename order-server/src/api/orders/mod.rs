//! Order API
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/orders | POST | Check out the cart |
//! | /api/orders/{email} | GET | Order history, newest first |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", post(handler::place))
        .route("/api/orders/{email}", get(handler::list))
}
