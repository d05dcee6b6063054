//! Menu Item Repository

use super::{RepoError, RepoResult, offer};
use shared::models::{MenuItem, MenuItemUpdate};
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

const SELECT: &str = "SELECT id, name, category, price, stock_quantity, image, created_at, updated_at FROM menu_item";

/// Validated fields for a new menu item (price already checked by the caller)
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock_quantity: i64,
    pub image: Option<String>,
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let sql = format!("{SELECT} ORDER BY category, name");
    let items = sqlx::query_as::<_, MenuItem>(&sql).fetch_all(pool).await?;
    Ok(items)
}

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("{SELECT} WHERE id = ?");
    let item = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(item)
}

/// Case-insensitive name lookup
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<MenuItem>> {
    let sql = format!("{SELECT} WHERE name = ? COLLATE NOCASE LIMIT 1");
    let item = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(name.trim())
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

pub async fn create(pool: &SqlitePool, data: NewMenuItem) -> RepoResult<MenuItem> {
    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Menu item '{}' already exists",
            data.name
        )));
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO menu_item (id, name, category, price, stock_quantity, image, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(data.category.trim())
    .bind(&data.price)
    .bind(data.stock_quantity)
    .bind(&data.image)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

/// Partial update. `price` is the raw text to store when changing the price.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: MenuItemUpdate,
    price: Option<String>,
) -> RepoResult<MenuItem> {
    if let Some(name) = &data.name
        && let Some(found) = find_by_name(pool, name).await?
        && found.id != id
    {
        return Err(RepoError::Duplicate(format!(
            "Menu item '{}' already exists",
            name
        )));
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE menu_item SET name = COALESCE(?1, name), category = COALESCE(?2, category), price = COALESCE(?3, price), stock_quantity = COALESCE(?4, stock_quantity), image = COALESCE(?5, image), updated_at = ?6 WHERE id = ?7",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.category.as_deref().map(str::trim))
    .bind(price)
    .bind(data.stock_quantity)
    .bind(data.image)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

/// Delete a menu item together with its offer
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;
    offer::delete_by_menu_item(&mut *tx, id).await?;
    let rows = sqlx::query("DELETE FROM menu_item WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(rows.rows_affected() > 0)
}

/// Take `amount` units of stock if at least that many remain.
/// Returns false when the item is missing or stock is insufficient.
pub async fn reserve_stock(conn: &mut SqliteConnection, id: i64, amount: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE menu_item SET stock_quantity = stock_quantity - ?1 WHERE id = ?2 AND stock_quantity >= ?1",
    )
    .bind(amount)
    .bind(id)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected() == 1)
}

/// Return `amount` units of stock. Returns false when the item no longer exists.
pub async fn release_stock(conn: &mut SqliteConnection, id: i64, amount: i64) -> RepoResult<bool> {
    let rows =
        sqlx::query("UPDATE menu_item SET stock_quantity = stock_quantity + ?1 WHERE id = ?2")
            .bind(amount)
            .bind(id)
            .execute(conn)
            .await?;
    Ok(rows.rows_affected() == 1)
}
