//! Event Hall Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Event hall entity. A hall is booked as a whole, so availability is a flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EventHall {
    pub id: i64,
    pub name: String,
    pub capacity: i64,
    pub price_per_hour: f64,
    pub available: bool,
}

/// Create event hall payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EventHallCreate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 1))]
    pub capacity: i64,
    #[validate(range(min = 0.0))]
    pub price_per_hour: f64,
    pub available: Option<bool>,
}

/// Update event hall payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EventHallUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 1))]
    pub capacity: Option<i64>,
    #[validate(range(min = 0.0))]
    pub price_per_hour: Option<f64>,
    pub available: Option<bool>,
}
