//! Order Repository

use super::{RepoError, RepoResult};
use shared::models::{CartLine, Order};
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

const SELECT: &str = "SELECT id, email, items, total, created_at FROM orders";

/// Persist an order snapshot
pub async fn insert(
    conn: &mut SqliteConnection,
    email: &str,
    items: &[CartLine],
    total: f64,
) -> RepoResult<Order> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let items_json = serde_json::to_string(items)
        .map_err(|e| RepoError::Database(format!("Failed to encode order items: {e}")))?;

    sqlx::query("INSERT INTO orders (id, email, items, total, created_at) VALUES (?1, ?2, ?3, ?4, ?5)")
        .bind(id)
        .bind(email)
        .bind(&items_json)
        .bind(total)
        .bind(now)
        .execute(conn)
        .await?;

    Ok(Order {
        id,
        email: email.to_string(),
        items: items.to_vec(),
        total,
        created_at: now,
    })
}

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{SELECT} WHERE id = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(order)
}

/// Orders for one customer, newest first
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Vec<Order>> {
    let sql = format!("{SELECT} WHERE email = ? ORDER BY created_at DESC, id DESC");
    let orders = sqlx::query_as::<_, Order>(&sql)
        .bind(email)
        .fetch_all(pool)
        .await?;
    Ok(orders)
}

pub async fn count_by_email(db: impl SqliteExecutor<'_>, email: &str) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE email = ?")
        .bind(email)
        .fetch_one(db)
        .await?;
    Ok(count)
}
