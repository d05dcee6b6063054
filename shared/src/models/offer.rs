//! Offer Model

use crate::price::{PriceError, PriceValue, normalize_raw};
use serde::{Deserialize, Serialize};

/// Promotional price override for one menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Offer {
    pub id: i64,
    pub menu_item_id: i64,
    /// Copy of the menu item name at creation time
    pub item_name: String,
    /// Normalized menu price at creation time
    pub original_price: f64,
    /// Raw discounted price text
    pub discounted_price: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Offer {
    pub fn discounted(&self) -> Result<f64, PriceError> {
        normalize_raw(&self.discounted_price)
    }

    pub fn to_view(&self) -> Result<OfferView, PriceError> {
        Ok(OfferView {
            id: self.id,
            menu_item_id: self.menu_item_id,
            item_name: self.item_name.clone(),
            original_price: self.original_price,
            discounted_price: self.discounted()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Offer as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferView {
    pub id: i64,
    pub menu_item_id: i64,
    pub item_name: String,
    pub original_price: f64,
    pub discounted_price: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create offer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferCreate {
    pub menu_item_id: i64,
    pub discounted_price: PriceValue,
}

/// Update offer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferUpdate {
    pub discounted_price: PriceValue,
}
