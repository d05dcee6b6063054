//! Order Model

use super::cart::CartLine;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Immutable order snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub email: String,
    /// Cart lines at checkout (stored as JSON)
    #[cfg_attr(feature = "db", sqlx(json))]
    pub items: Vec<CartLine>,
    pub total: f64,
    pub created_at: i64,
}

/// Place order payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlaceOrder {
    #[validate(email)]
    pub email: String,
}
