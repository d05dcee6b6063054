//! Cart Ledger operations
//!
//! Every mutation runs in one SQLite transaction that starts with a write to the
//! cart row, so the reservation and the ledger change commit together. Any error
//! after a reservation rolls the transaction back, which restores availability.

use super::{CartError, CartLocks, cart_key};
use crate::inventory::{self, InventoryError};
use crate::pricing;
use dine_store::RepoError;
use dine_store::repository::cart;
use shared::models::{AddCartItem, Cart, CartLine, ItemType};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use validator::Validate;

#[derive(Clone)]
pub struct CartLedger {
    pool: SqlitePool,
    locks: CartLocks,
}

impl CartLedger {
    pub fn new(pool: SqlitePool, locks: CartLocks) -> Self {
        Self { pool, locks }
    }

    pub fn locks(&self) -> &CartLocks {
        &self.locks
    }

    /// Current cart. A customer without a cart gets an empty one.
    pub async fn get(&self, email: &str) -> Result<Cart, CartError> {
        let email = cart_key(email)?;
        let lines = cart::lines(&self.pool, &email).await?;
        build_cart(email, lines)
    }

    /// Reserve `quantity` of a resource and record it in the cart.
    ///
    /// A line for the same resource is merged by quantity and keeps the price it
    /// captured when it was created.
    pub async fn add_item(&self, req: AddCartItem) -> Result<Cart, CartError> {
        req.validate()
            .map_err(|e| CartError::Validation(e.to_string()))?;
        let email = cart_key(&req.email)?;

        let _guard = self.locks.lock(&email).await;
        let mut tx = self.pool.begin().await?;
        let result = add_in_tx(&mut tx, &email, &req).await;
        let cart = finish(tx, result, "add_item", &email).await?;

        tracing::info!(
            email = %email,
            item_id = req.item_id,
            item_type = %req.item_type,
            quantity = req.quantity,
            total = cart.total_cost,
            "Item added to cart"
        );
        Ok(cart)
    }

    /// Adjust a line by `delta`.
    ///
    /// A positive delta reserves the extra units first, a negative one releases
    /// them. When the resulting quantity drops to zero or below, the line is
    /// removed and exactly the quantity it held is released.
    pub async fn change_quantity(
        &self,
        email: &str,
        item_id: i64,
        item_type: ItemType,
        delta: i64,
    ) -> Result<Cart, CartError> {
        if delta == 0 {
            return Err(CartError::Validation("change must not be zero".into()));
        }
        let email = cart_key(email)?;

        let _guard = self.locks.lock(&email).await;
        let mut tx = self.pool.begin().await?;
        let result = change_in_tx(&mut tx, &email, item_id, item_type, delta).await;
        let cart = finish(tx, result, "change_quantity", &email).await?;

        tracing::info!(
            email = %email,
            item_id,
            item_type = %item_type,
            delta,
            total = cart.total_cost,
            "Cart quantity changed"
        );
        Ok(cart)
    }

    /// Remove a line and release everything it held
    pub async fn remove_item(
        &self,
        email: &str,
        item_id: i64,
        item_type: ItemType,
    ) -> Result<Cart, CartError> {
        let email = cart_key(email)?;

        let _guard = self.locks.lock(&email).await;
        let mut tx = self.pool.begin().await?;
        let result = remove_in_tx(&mut tx, &email, item_id, item_type).await;
        let cart = finish(tx, result, "remove_item", &email).await?;

        tracing::info!(email = %email, item_id, item_type = %item_type, "Cart line removed");
        Ok(cart)
    }

    /// Release every reservation in the cart and delete it.
    /// Returns the number of lines released; a missing cart releases nothing.
    pub async fn abandon(&self, email: &str) -> Result<usize, CartError> {
        let email = cart_key(email)?;

        let _guard = self.locks.lock(&email).await;
        let mut tx = self.pool.begin().await?;
        let result = abandon_in_tx(&mut tx, &email).await;
        let released = finish(tx, result, "abandon", &email).await?;

        if released > 0 {
            tracing::info!(email = %email, released, "Cart abandoned");
        }
        Ok(released)
    }

    /// Delete a cart without releasing its reservations.
    ///
    /// Used by checkout, where the reserved units become part of the order. Runs
    /// on the caller's transaction.
    pub async fn clear(conn: &mut SqliteConnection, email: &str) -> Result<bool, RepoError> {
        cart::delete(conn, email).await
    }
}

async fn add_in_tx(
    conn: &mut SqliteConnection,
    email: &str,
    req: &AddCartItem,
) -> Result<Cart, CartError> {
    cart::touch(&mut *conn, email).await?;

    match cart::find_line(&mut *conn, email, req.item_id, req.item_type).await? {
        Some(line) => {
            inventory::reserve(&mut *conn, req.item_type, req.item_id, req.quantity).await?;
            let quantity = line
                .quantity
                .checked_add(req.quantity)
                .ok_or_else(|| CartError::Validation("quantity overflow".into()))?;
            cart::set_quantity(&mut *conn, email, req.item_id, req.item_type, quantity).await?;
        }
        None => {
            let priced =
                pricing::price_item(&mut *conn, req.item_type, req.item_id, req.price.as_ref())
                    .await?;
            inventory::reserve(&mut *conn, req.item_type, req.item_id, req.quantity).await?;
            let name = req
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .unwrap_or(priced.name);
            let line = CartLine {
                item_id: req.item_id,
                item_type: req.item_type,
                name,
                unit_price: priced.unit_price,
                quantity: req.quantity,
            };
            cart::insert_line(&mut *conn, email, &line).await?;
        }
    }

    load(conn, email).await
}

async fn change_in_tx(
    conn: &mut SqliteConnection,
    email: &str,
    item_id: i64,
    item_type: ItemType,
    delta: i64,
) -> Result<Cart, CartError> {
    cart::touch(&mut *conn, email).await?;
    let line = cart::find_line(&mut *conn, email, item_id, item_type)
        .await?
        .ok_or(CartError::LineNotFound { item_id, item_type })?;

    if delta > 0 {
        inventory::reserve(&mut *conn, item_type, item_id, delta).await?;
    }

    let quantity = line.quantity.saturating_add(delta);
    if quantity <= 0 {
        drop_line(&mut *conn, email, &line).await?;
    } else {
        if delta < 0 {
            // The line keeps holding exactly its quantity
            release_units(&mut *conn, item_type, item_id, -delta).await?;
        }
        cart::set_quantity(&mut *conn, email, item_id, item_type, quantity).await?;
    }

    load(conn, email).await
}

async fn remove_in_tx(
    conn: &mut SqliteConnection,
    email: &str,
    item_id: i64,
    item_type: ItemType,
) -> Result<Cart, CartError> {
    cart::touch(&mut *conn, email).await?;
    let line = cart::find_line(&mut *conn, email, item_id, item_type)
        .await?
        .ok_or(CartError::LineNotFound { item_id, item_type })?;
    drop_line(&mut *conn, email, &line).await?;
    load(conn, email).await
}

async fn abandon_in_tx(conn: &mut SqliteConnection, email: &str) -> Result<usize, CartError> {
    cart::touch(&mut *conn, email).await?;
    let lines = cart::lines(&mut *conn, email).await?;
    for line in &lines {
        release_line(&mut *conn, line).await?;
    }
    cart::delete(&mut *conn, email).await?;
    Ok(lines.len())
}

/// Release what the line holds, delete it, and delete the cart if it is now empty
async fn drop_line(
    conn: &mut SqliteConnection,
    email: &str,
    line: &CartLine,
) -> Result<(), CartError> {
    release_line(&mut *conn, line).await?;
    cart::delete_line(&mut *conn, email, line.item_id, line.item_type).await?;
    cart::delete_if_empty(&mut *conn, email).await?;
    Ok(())
}

async fn release_line(conn: &mut SqliteConnection, line: &CartLine) -> Result<(), CartError> {
    release_units(conn, line.item_type, line.item_id, line.quantity).await
}

async fn release_units(
    conn: &mut SqliteConnection,
    kind: ItemType,
    id: i64,
    amount: i64,
) -> Result<(), CartError> {
    match inventory::release(conn, kind, id, amount).await {
        Ok(()) => Ok(()),
        // The catalog entry was deleted while reserved; nothing left to credit
        Err(InventoryError::NotFound { kind, id }) => {
            tracing::warn!(kind = %kind, id, amount, "Released units for a resource that no longer exists");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn load(conn: &mut SqliteConnection, email: &str) -> Result<Cart, CartError> {
    let lines = cart::lines(conn, email).await?;
    build_cart(email.to_string(), lines)
}

fn build_cart(email: String, items: Vec<CartLine>) -> Result<Cart, CartError> {
    let total_cost = shared::money::sum_lines(items.iter().map(|l| (l.unit_price, l.quantity)))?;
    Ok(Cart {
        email,
        items,
        total_cost,
    })
}

/// Commit on success, roll back on failure
async fn finish<T>(
    tx: Transaction<'_, Sqlite>,
    result: Result<T, CartError>,
    op: &'static str,
    email: &str,
) -> Result<T, CartError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(op, email = %email, error = %rollback_err, "Cart rollback failed");
            }
            match &e {
                CartError::Repo(_) => {
                    tracing::warn!(op, email = %email, error = %e, "Cart change rolled back")
                }
                _ => tracing::debug!(op, email = %email, error = %e, "Cart change rejected"),
            }
            Err(e)
        }
    }
}
