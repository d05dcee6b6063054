//! Dining Table Repository

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

const SELECT: &str =
    "SELECT id, name, capacity, air_conditioned, price_per_hour, available, booked FROM dining_table";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("{SELECT} ORDER BY name");
    let tables = sqlx::query_as::<_, DiningTable>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(tables)
}

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<DiningTable>> {
    let sql = format!("{SELECT} WHERE id = ?");
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(table)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<DiningTable>> {
    let sql = format!("{SELECT} WHERE name = ? COLLATE NOCASE LIMIT 1");
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(name.trim())
        .fetch_optional(pool)
        .await?;
    Ok(table)
}

pub async fn create(pool: &SqlitePool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Table '{}' already exists",
            data.name
        )));
    }

    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO dining_table (id, name, capacity, air_conditioned, price_per_hour, available, booked) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0)",
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(data.capacity)
    .bind(data.air_conditioned)
    .bind(data.price_per_hour)
    .bind(data.available)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create table".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: DiningTableUpdate) -> RepoResult<DiningTable> {
    if let Some(name) = &data.name
        && let Some(found) = find_by_name(pool, name).await?
        && found.id != id
    {
        return Err(RepoError::Duplicate(format!("Table '{}' already exists", name)));
    }

    let rows = sqlx::query(
        "UPDATE dining_table SET name = COALESCE(?1, name), capacity = COALESCE(?2, capacity), air_conditioned = COALESCE(?3, air_conditioned), price_per_hour = COALESCE(?4, price_per_hour), available = COALESCE(?5, available) WHERE id = ?6",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.capacity)
    .bind(data.air_conditioned)
    .bind(data.price_per_hour)
    .bind(data.available)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM dining_table WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Book `amount` units if at least that many are available.
/// Returns false when the table is missing or availability is insufficient.
pub async fn reserve(conn: &mut SqliteConnection, id: i64, amount: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE dining_table SET available = available - ?1, booked = booked + ?1 WHERE id = ?2 AND available >= ?1",
    )
    .bind(amount)
    .bind(id)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected() == 1)
}

/// Return `amount` booked units. Returns false when the table no longer exists.
pub async fn release(conn: &mut SqliteConnection, id: i64, amount: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE dining_table SET available = available + ?1, booked = MAX(booked - ?1, 0) WHERE id = ?2",
    )
    .bind(amount)
    .bind(id)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected() == 1)
}
