//! order-server: customer-facing ordering service
//!
//! Customers add menu items, dining tables and event halls to a per-email cart.
//! Every add reserves availability in the same transaction that records the line,
//! so the catalog never oversells. Checkout turns the cart into an immutable order.

pub mod api;
pub mod auth;
pub mod cart;
pub mod config;
pub mod inventory;
pub mod orders;
pub mod pricing;
pub mod state;
pub mod utils;

pub use api::build_app;
pub use config::Config;
pub use state::AppState;
