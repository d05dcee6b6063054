//! Cart Repository
//!
//! A cart is a row in `cart` keyed by email plus its ordered `cart_item` lines.
//! Every mutating path starts with [`touch`], which is a write: inside a
//! transaction it takes SQLite's write lock before anything is read, so two
//! writers on the same database never deadlock on a lock upgrade.

use super::RepoResult;
use shared::models::{CartLine, ItemType};
use sqlx::{SqliteConnection, SqliteExecutor};

const LINE_SELECT: &str =
    "SELECT item_id, item_type, name, unit_price, quantity FROM cart_item WHERE cart_email = ?";

/// Create the cart row if missing, otherwise bump `updated_at`
pub async fn touch(conn: &mut SqliteConnection, email: &str) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO cart (email, created_at, updated_at) VALUES (?1, ?2, ?2) ON CONFLICT(email) DO UPDATE SET updated_at = excluded.updated_at",
    )
    .bind(email)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(())
}

/// Lines in insertion order
pub async fn lines(db: impl SqliteExecutor<'_>, email: &str) -> RepoResult<Vec<CartLine>> {
    let sql = format!("{LINE_SELECT} ORDER BY position");
    let lines = sqlx::query_as::<_, CartLine>(&sql)
        .bind(email)
        .fetch_all(db)
        .await?;
    Ok(lines)
}

pub async fn find_line(
    conn: &mut SqliteConnection,
    email: &str,
    item_id: i64,
    item_type: ItemType,
) -> RepoResult<Option<CartLine>> {
    let sql = format!("{LINE_SELECT} AND item_id = ? AND item_type = ?");
    let line = sqlx::query_as::<_, CartLine>(&sql)
        .bind(email)
        .bind(item_id)
        .bind(item_type)
        .fetch_optional(conn)
        .await?;
    Ok(line)
}

/// Append a line after the current last one
pub async fn insert_line(conn: &mut SqliteConnection, email: &str, line: &CartLine) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO cart_item (cart_email, position, item_id, item_type, name, unit_price, quantity) VALUES (?1, (SELECT COALESCE(MAX(position) + 1, 0) FROM cart_item WHERE cart_email = ?1), ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(email)
    .bind(line.item_id)
    .bind(line.item_type)
    .bind(&line.name)
    .bind(line.unit_price)
    .bind(line.quantity)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn set_quantity(
    conn: &mut SqliteConnection,
    email: &str,
    item_id: i64,
    item_type: ItemType,
    quantity: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE cart_item SET quantity = ?1 WHERE cart_email = ?2 AND item_id = ?3 AND item_type = ?4",
    )
    .bind(quantity)
    .bind(email)
    .bind(item_id)
    .bind(item_type)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected() == 1)
}

pub async fn delete_line(
    conn: &mut SqliteConnection,
    email: &str,
    item_id: i64,
    item_type: ItemType,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "DELETE FROM cart_item WHERE cart_email = ?1 AND item_id = ?2 AND item_type = ?3",
    )
    .bind(email)
    .bind(item_id)
    .bind(item_type)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected() == 1)
}

/// Remove the cart and all of its lines
pub async fn delete(conn: &mut SqliteConnection, email: &str) -> RepoResult<bool> {
    sqlx::query("DELETE FROM cart_item WHERE cart_email = ?")
        .bind(email)
        .execute(&mut *conn)
        .await?;
    let rows = sqlx::query("DELETE FROM cart WHERE email = ?")
        .bind(email)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Remove the cart row when it has no lines left
pub async fn delete_if_empty(conn: &mut SqliteConnection, email: &str) -> RepoResult<bool> {
    let rows = sqlx::query(
        "DELETE FROM cart WHERE email = ?1 AND NOT EXISTS (SELECT 1 FROM cart_item WHERE cart_email = ?1)",
    )
    .bind(email)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn exists(db: impl SqliteExecutor<'_>, email: &str) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM cart WHERE email = ?")
        .bind(email)
        .fetch_optional(db)
        .await?;
    Ok(found.is_some())
}
