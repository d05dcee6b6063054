//! Menu Item Model

use crate::price::{PriceError, PriceValue, normalize_raw};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Menu item entity
///
/// `price` holds the raw text the admin entered; use [`MenuItem::unit_price`] to read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock_quantity: i64,
    pub image: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MenuItem {
    /// Normalized catalog price
    pub fn unit_price(&self) -> Result<f64, PriceError> {
        normalize_raw(&self.price)
    }

    /// Public representation with the price normalized
    pub fn to_view(&self) -> Result<MenuItemView, PriceError> {
        Ok(MenuItemView {
            id: self.id,
            name: self.name.clone(),
            category: self.category.clone(),
            price: self.unit_price()?,
            stock_quantity: self.stock_quantity,
            image: self.image.clone(),
        })
    }
}

/// Menu item as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemView {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock_quantity: i64,
    pub image: Option<String>,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    pub price: PriceValue,
    #[validate(range(min = 0))]
    pub stock_quantity: i64,
    pub image: Option<String>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MenuItemUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,
    pub price: Option<PriceValue>,
    #[validate(range(min = 0))]
    pub stock_quantity: Option<i64>,
    pub image: Option<String>,
}
