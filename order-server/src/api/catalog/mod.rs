//! Read-only catalog API
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/menu | GET | Menu items with normalized prices |
//! | /api/menu/{id} | GET | One menu item |
//! | /api/tables | GET | Dining tables |
//! | /api/event-halls | GET | Event halls |
//! | /api/offers | GET | Active offers |

mod handler;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/menu", get(handler::list_menu))
        .route("/api/menu/{id}", get(handler::get_menu_item))
        .route("/api/tables", get(handler::list_tables))
        .route("/api/event-halls", get(handler::list_event_halls))
        .route("/api/offers", get(handler::list_offers))
}
