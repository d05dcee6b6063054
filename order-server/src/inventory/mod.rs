//! Inventory Store
//!
//! Reserve and release availability for the three bookable resource kinds:
//! menu stock and table availability are counters, an event hall is a flag.
//! Each operation is a single conditional `UPDATE`, so the availability check and
//! the decrement cannot interleave with another request. Both run on the
//! caller's connection and commit or roll back with the surrounding cart change.

use dine_store::RepoError;
use dine_store::repository::{dining_table, event_hall, menu_item};
use shared::error::{AppError, ErrorCode};
use shared::models::ItemType;
use sqlx::SqliteConnection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("{kind} {id} not found")]
    NotFound { kind: ItemType, id: i64 },

    #[error("insufficient availability for {kind} {id}: requested {requested}, available {available}")]
    InsufficientStock {
        kind: ItemType,
        id: i64,
        requested: i64,
        available: i64,
    },

    #[error("{kind} {id} is not available")]
    Unavailable { kind: ItemType, id: i64 },

    #[error("invalid amount {amount} for {kind}")]
    InvalidAmount { kind: ItemType, amount: i64 },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        let message = err.to_string();
        match err {
            InventoryError::NotFound { kind, id } => {
                let code = match kind {
                    ItemType::Menu => ErrorCode::MenuItemNotFound,
                    ItemType::Table => ErrorCode::TableNotFound,
                    ItemType::EventHall => ErrorCode::EventHallNotFound,
                };
                AppError::with_message(code, message).with_detail("item_id", id)
            }
            InventoryError::InsufficientStock {
                id,
                requested,
                available,
                ..
            } => AppError::with_message(ErrorCode::InsufficientStock, message)
                .with_detail("item_id", id)
                .with_detail("requested", requested)
                .with_detail("available", available),
            InventoryError::Unavailable { id, .. } => {
                AppError::with_message(ErrorCode::Unavailable, message).with_detail("item_id", id)
            }
            InventoryError::InvalidAmount { .. } => AppError::validation(message),
            InventoryError::Repo(e) => e.into(),
        }
    }
}

/// Take `amount` units of the resource.
///
/// Event halls are booked whole, so `amount` must be 1 for them.
pub async fn reserve(
    conn: &mut SqliteConnection,
    kind: ItemType,
    id: i64,
    amount: i64,
) -> Result<(), InventoryError> {
    check_amount(kind, amount)?;

    let taken = match kind {
        ItemType::Menu => menu_item::reserve_stock(&mut *conn, id, amount).await?,
        ItemType::Table => dining_table::reserve(&mut *conn, id, amount).await?,
        ItemType::EventHall => event_hall::reserve(&mut *conn, id).await?,
    };
    if taken {
        tracing::debug!(kind = %kind, id, amount, "Reserved");
        return Ok(());
    }

    // Nothing matched: tell a missing record apart from a denied reservation
    match kind {
        ItemType::Menu => match menu_item::find_by_id(&mut *conn, id).await? {
            None => Err(InventoryError::NotFound { kind, id }),
            Some(item) => Err(InventoryError::InsufficientStock {
                kind,
                id,
                requested: amount,
                available: item.stock_quantity,
            }),
        },
        ItemType::Table => match dining_table::find_by_id(&mut *conn, id).await? {
            None => Err(InventoryError::NotFound { kind, id }),
            Some(table) => Err(InventoryError::InsufficientStock {
                kind,
                id,
                requested: amount,
                available: table.available,
            }),
        },
        ItemType::EventHall => match event_hall::find_by_id(&mut *conn, id).await? {
            None => Err(InventoryError::NotFound { kind, id }),
            Some(_) => Err(InventoryError::Unavailable { kind, id }),
        },
    }
}

/// Give back `amount` units of the resource.
///
/// Unconditional: callers release exactly what a cart line held, in the same
/// transaction that removes the line.
pub async fn release(
    conn: &mut SqliteConnection,
    kind: ItemType,
    id: i64,
    amount: i64,
) -> Result<(), InventoryError> {
    if amount < 1 {
        return Err(InventoryError::InvalidAmount { kind, amount });
    }

    let found = match kind {
        ItemType::Menu => menu_item::release_stock(&mut *conn, id, amount).await?,
        ItemType::Table => dining_table::release(&mut *conn, id, amount).await?,
        ItemType::EventHall => event_hall::release(&mut *conn, id).await?,
    };
    if !found {
        return Err(InventoryError::NotFound { kind, id });
    }
    tracing::debug!(kind = %kind, id, amount, "Released");
    Ok(())
}

fn check_amount(kind: ItemType, amount: i64) -> Result<(), InventoryError> {
    let valid = match kind {
        ItemType::EventHall => amount == 1,
        ItemType::Menu | ItemType::Table => amount >= 1,
    };
    if valid {
        Ok(())
    } else {
        Err(InventoryError::InvalidAmount { kind, amount })
    }
}
