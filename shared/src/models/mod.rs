//! Data models
//!
//! Shared between order-server, admin-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflake ids.

pub mod admin;
pub mod cart;
pub mod dining_table;
pub mod event_hall;
pub mod menu_item;
pub mod offer;
pub mod order;
pub mod user;

// Re-exports
pub use admin::*;
pub use cart::*;
pub use dining_table::*;
pub use event_hall::*;
pub use menu_item::*;
pub use offer::*;
pub use order::*;
pub use user::*;
