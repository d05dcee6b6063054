//! Shared types for the Dine services
//!
//! Error codes and response structures, domain models, price normalization and
//! money/id utilities used by both order-server and admin-server.

pub mod error;
pub mod models;
pub mod money;
pub mod password;
pub mod price;
pub mod util;

pub use error::{AppError, AppResult, ErrorCode};
pub use price::{PriceError, PriceValue, normalize_price};
