//! Order Finalizer
//!
//! Turns a cart into an immutable order. The order insert and the cart delete
//! share one transaction: if persisting fails, the cart and its reservations are
//! left exactly as they were.

use crate::cart::{CartError, CartLedger, CartLocks, cart_key};
use dine_store::RepoError;
use dine_store::repository::{cart, order};
use shared::error::{AppError, ErrorCode};
use shared::models::Order;
use shared::money::MoneyError;
use sqlx::{SqliteConnection, SqlitePool};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("{0}")]
    Validation(String),

    #[error("cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        OrderError::Repo(err.into())
    }
}

impl From<CartError> for OrderError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::Repo(e) => OrderError::Repo(e),
            CartError::Money(e) => OrderError::Money(e),
            other => OrderError::Validation(other.to_string()),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Validation(msg) => AppError::validation(msg),
            OrderError::EmptyCart => AppError::new(ErrorCode::EmptyCart),
            OrderError::Money(e) => e.into(),
            OrderError::Repo(e) => e.into(),
        }
    }
}

#[derive(Clone)]
pub struct OrderFinalizer {
    pool: SqlitePool,
    locks: CartLocks,
}

impl OrderFinalizer {
    /// `locks` must be the same set the cart ledger uses
    pub fn new(pool: SqlitePool, locks: CartLocks) -> Self {
        Self { pool, locks }
    }

    /// Check out the cart of `email`
    pub async fn place_order(&self, email: &str) -> Result<Order, OrderError> {
        let email = cart_key(email)?;

        let _guard = self.locks.lock(&email).await;
        let mut tx = self.pool.begin().await?;
        match checkout(&mut tx, &email).await {
            Ok(placed) => {
                tx.commit().await?;
                tracing::info!(
                    email = %email,
                    order_id = placed.id,
                    lines = placed.items.len(),
                    total = placed.total,
                    "Order placed"
                );
                Ok(placed)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(email = %email, error = %rollback_err, "Checkout rollback failed");
                }
                if let OrderError::Repo(_) = &e {
                    tracing::warn!(email = %email, error = %e, "Checkout failed, cart kept");
                }
                Err(e)
            }
        }
    }

    /// Past orders of `email`, newest first
    pub async fn orders_for(&self, email: &str) -> Result<Vec<Order>, OrderError> {
        let email = cart_key(email)?;
        Ok(order::find_by_email(&self.pool, &email).await?)
    }
}

async fn checkout(conn: &mut SqliteConnection, email: &str) -> Result<Order, OrderError> {
    // Write first so the transaction holds the lock before reading the cart
    cart::touch(&mut *conn, email).await?;
    let lines = cart::lines(&mut *conn, email).await?;
    if lines.is_empty() {
        return Err(OrderError::EmptyCart);
    }

    let total = shared::money::sum_lines(lines.iter().map(|l| (l.unit_price, l.quantity)))?;
    let placed = order::insert(&mut *conn, email, &lines, total).await?;
    CartLedger::clear(&mut *conn, email).await?;
    Ok(placed)
}
