//! Offer Repository

use super::{RepoError, RepoResult};
use shared::models::Offer;
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

const SELECT: &str = "SELECT id, menu_item_id, item_name, original_price, discounted_price, created_at, updated_at FROM offer";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Offer>> {
    let sql = format!("{SELECT} ORDER BY created_at DESC");
    let offers = sqlx::query_as::<_, Offer>(&sql).fetch_all(pool).await?;
    Ok(offers)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Offer>> {
    let sql = format!("{SELECT} WHERE id = ?");
    let offer = sqlx::query_as::<_, Offer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(offer)
}

pub async fn find_by_menu_item(
    db: impl SqliteExecutor<'_>,
    menu_item_id: i64,
) -> RepoResult<Option<Offer>> {
    let sql = format!("{SELECT} WHERE menu_item_id = ?");
    let offer = sqlx::query_as::<_, Offer>(&sql)
        .bind(menu_item_id)
        .fetch_optional(db)
        .await?;
    Ok(offer)
}

pub async fn create(
    pool: &SqlitePool,
    menu_item_id: i64,
    item_name: &str,
    original_price: f64,
    discounted_price: &str,
) -> RepoResult<Offer> {
    if find_by_menu_item(pool, menu_item_id).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Menu item {menu_item_id} already has an offer"
        )));
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO offer (id, menu_item_id, item_name, original_price, discounted_price, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(id)
    .bind(menu_item_id)
    .bind(item_name)
    .bind(original_price)
    .bind(discounted_price)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create offer".into()))
}

pub async fn update_discount(
    pool: &SqlitePool,
    id: i64,
    discounted_price: &str,
) -> RepoResult<Offer> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE offer SET discounted_price = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(discounted_price)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Offer {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Offer {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM offer WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn delete_by_menu_item(conn: &mut SqliteConnection, menu_item_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM offer WHERE menu_item_id = ?")
        .bind(menu_item_id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected())
}
