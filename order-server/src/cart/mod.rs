//! Cart Ledger
//!
//! Per-customer carts whose lines double as inventory reservations.
//!
//! # Lifecycle
//!
//! ```text
//! NoCart --add_item--> ActiveCart --last line removed / abandon / place_order--> NoCart
//! ```

mod ledger;
mod locks;

pub use ledger::CartLedger;
pub use locks::CartLocks;

use crate::inventory::InventoryError;
use crate::pricing::PricingError;
use dine_store::RepoError;
use shared::error::{AppError, ErrorCode};
use shared::money::MoneyError;
use shared::models::ItemType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("{0}")]
    Validation(String),

    #[error("{item_type} {item_id} is not in the cart")]
    LineNotFound { item_id: i64, item_type: ItemType },

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<sqlx::Error> for CartError {
    fn from(err: sqlx::Error) -> Self {
        CartError::Repo(err.into())
    }
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::Validation(msg) => AppError::validation(msg),
            CartError::LineNotFound { item_id, item_type } => AppError::with_message(
                ErrorCode::CartItemNotFound,
                format!("{item_type} {item_id} is not in the cart"),
            )
            .with_detail("item_id", item_id)
            .with_detail("item_type", item_type.as_str()),
            CartError::Inventory(e) => e.into(),
            CartError::Pricing(e) => e.into(),
            CartError::Money(e) => e.into(),
            CartError::Repo(e) => e.into(),
        }
    }
}

/// Normalize and sanity-check a cart key
pub(crate) fn cart_key(email: &str) -> Result<String, CartError> {
    let email = shared::util::normalize_email(email);
    if email.is_empty() || !email.contains('@') {
        return Err(CartError::Validation(format!("invalid email: {email:?}")));
    }
    Ok(email)
}
