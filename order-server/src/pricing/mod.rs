//! Effective price resolution
//!
//! A cart line captures its unit price once, when it is created. For menu items
//! that is the offer price when a valid offer exists, otherwise the normalized
//! catalog price. Tables and event halls honor the client's price hint when one is
//! given and fall back to the catalog hourly price.

use dine_store::RepoError;
use dine_store::repository::{dining_table, event_hall, menu_item, offer};
use shared::error::{AppError, ErrorCode};
use shared::models::ItemType;
use shared::price::{PriceError, PriceValue, normalize_price};
use sqlx::SqliteConnection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("{kind} {id} not found")]
    NotFound { kind: ItemType, id: i64 },

    #[error("{kind} {id} has an invalid price: {source}")]
    InvalidPrice {
        kind: ItemType,
        id: i64,
        source: PriceError,
    },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        let message = err.to_string();
        match err {
            PricingError::NotFound { kind, id } => {
                let code = match kind {
                    ItemType::Menu => ErrorCode::MenuItemNotFound,
                    ItemType::Table => ErrorCode::TableNotFound,
                    ItemType::EventHall => ErrorCode::EventHallNotFound,
                };
                AppError::with_message(code, message).with_detail("item_id", id)
            }
            PricingError::InvalidPrice { id, .. } => {
                AppError::invalid_price(message).with_detail("item_id", id)
            }
            PricingError::Repo(e) => e.into(),
        }
    }
}

/// Catalog name and effective unit price of a resource
#[derive(Debug, Clone, PartialEq)]
pub struct PricedItem {
    pub name: String,
    pub unit_price: f64,
}

/// Discounted price for a menu item, if it has a usable offer.
///
/// An offer whose price does not normalize is ignored with a warning.
pub async fn resolve_offer(
    conn: &mut SqliteConnection,
    menu_item_id: i64,
) -> Result<Option<f64>, RepoError> {
    let Some(found) = offer::find_by_menu_item(&mut *conn, menu_item_id).await? else {
        return Ok(None);
    };
    match found.discounted() {
        Ok(price) => Ok(Some(price)),
        Err(e) => {
            tracing::warn!(
                offer_id = found.id,
                menu_item_id,
                raw = %found.discounted_price,
                error = %e,
                "Ignoring offer with invalid price"
            );
            Ok(None)
        }
    }
}

/// Look up the resource and decide the price a new cart line will capture
pub async fn price_item(
    conn: &mut SqliteConnection,
    kind: ItemType,
    id: i64,
    price_hint: Option<&PriceValue>,
) -> Result<PricedItem, PricingError> {
    let invalid = |source| PricingError::InvalidPrice { kind, id, source };

    match kind {
        ItemType::Menu => {
            let item = menu_item::find_by_id(&mut *conn, id)
                .await?
                .ok_or(PricingError::NotFound { kind, id })?;
            // Offers are only consulted for an item that still exists
            let unit_price = match resolve_offer(conn, id).await? {
                Some(discounted) => discounted,
                None => item.unit_price().map_err(invalid)?,
            };
            Ok(PricedItem {
                name: item.name,
                unit_price,
            })
        }
        ItemType::Table => {
            let table = dining_table::find_by_id(&mut *conn, id)
                .await?
                .ok_or(PricingError::NotFound { kind, id })?;
            let unit_price = hint_or_catalog(price_hint, table.price_per_hour).map_err(invalid)?;
            Ok(PricedItem {
                name: table.name,
                unit_price,
            })
        }
        ItemType::EventHall => {
            let hall = event_hall::find_by_id(&mut *conn, id)
                .await?
                .ok_or(PricingError::NotFound { kind, id })?;
            let unit_price = hint_or_catalog(price_hint, hall.price_per_hour).map_err(invalid)?;
            Ok(PricedItem {
                name: hall.name,
                unit_price,
            })
        }
    }
}

fn hint_or_catalog(hint: Option<&PriceValue>, catalog: f64) -> Result<f64, PriceError> {
    match hint {
        Some(value) => normalize_price(value),
        None => normalize_price(&PriceValue::Number(catalog)),
    }
}
