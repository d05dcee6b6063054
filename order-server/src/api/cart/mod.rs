//! Cart API
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/cart/add | POST | Reserve and add an item |
//! | /api/cart/{email} | GET | Current cart |
//! | /api/cart/{email} | DELETE | Release everything and drop the cart |
//! | /api/cart/{email}/{item_id} | PUT | Change a line quantity by a delta |
//! | /api/cart/{email}/{item_id}?item_type= | DELETE | Remove one line |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(handler::add))
        .route("/{email}", get(handler::get).delete(handler::abandon))
        .route(
            "/{email}/{item_id}",
            put(handler::change_quantity).delete(handler::remove),
        )
}
