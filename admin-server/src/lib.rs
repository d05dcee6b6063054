//! admin-server: catalog administration for the Dine services
//!
//! Admins log in with email and password and receive a 24 hour JWT. Every
//! catalog route (menu, tables, event halls, offers) requires that token.

pub mod api;
pub mod auth;
pub mod config;
pub mod state;

pub use api::build_app;
pub use config::Config;
pub use state::AppState;
