//! Cart Model

use crate::price::PriceValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Kind of bookable resource a cart line refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum ItemType {
    Menu,
    Table,
    #[serde(alias = "event_hall", alias = "eventHall")]
    EventHall,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Menu => "menu",
            ItemType::Table => "table",
            ItemType::EventHall => "eventhall",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "menu" => Ok(ItemType::Menu),
            "table" => Ok(ItemType::Table),
            "eventhall" | "event_hall" => Ok(ItemType::EventHall),
            other => Err(format!("unknown item type: {other}")),
        }
    }
}

/// One reserved line in a cart. `unit_price` is frozen when the line is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartLine {
    pub item_id: i64,
    pub item_type: ItemType,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
}

/// Cart contents for one customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub email: String,
    pub items: Vec<CartLine>,
    #[serde(alias = "totalCost")]
    pub total_cost: f64,
}

impl Cart {
    pub fn empty(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            items: Vec::new(),
            total_cost: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line(&self, item_id: i64, item_type: ItemType) -> Option<&CartLine> {
        self.items
            .iter()
            .find(|l| l.item_id == item_id && l.item_type == item_type)
    }
}

/// Add-to-cart payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddCartItem {
    #[validate(email)]
    pub email: String,
    #[serde(alias = "itemId")]
    pub item_id: i64,
    #[serde(alias = "itemType")]
    pub item_type: ItemType,
    /// Display name; the catalog name is used when absent
    #[validate(length(max = 100))]
    pub name: Option<String>,
    /// Price hint, honored for tables and event halls only
    pub price: Option<PriceValue>,
    #[validate(range(min = 1, max = 9999))]
    pub quantity: i64,
}

/// Quantity change payload (`change` may be negative)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeQuantity {
    pub change: i64,
    #[serde(alias = "itemType")]
    pub item_type: ItemType,
}

/// Query for removing a single line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineQuery {
    #[serde(alias = "itemType")]
    pub item_type: ItemType,
}

/// Result of abandoning a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbandonedCart {
    /// Number of lines whose reservations were released
    pub released: usize,
}
