//! Dining Table Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Dining table entity
///
/// `available` counts bookable units; `booked` counts units currently held by carts
/// or orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub name: String,
    pub capacity: i64,
    pub air_conditioned: bool,
    pub price_per_hour: f64,
    pub available: i64,
    pub booked: i64,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiningTableCreate {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(range(min = 1))]
    pub capacity: i64,
    #[serde(default)]
    pub air_conditioned: bool,
    #[validate(range(min = 0.0))]
    pub price_per_hour: f64,
    #[validate(range(min = 0))]
    pub available: i64,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DiningTableUpdate {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(range(min = 1))]
    pub capacity: Option<i64>,
    pub air_conditioned: Option<bool>,
    #[validate(range(min = 0.0))]
    pub price_per_hour: Option<f64>,
    #[validate(range(min = 0))]
    pub available: Option<i64>,
}
