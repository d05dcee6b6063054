//! Event Hall Repository

use super::{RepoError, RepoResult};
use shared::models::{EventHall, EventHallCreate, EventHallUpdate};
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

const SELECT: &str = "SELECT id, name, capacity, price_per_hour, available FROM event_hall";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<EventHall>> {
    let sql = format!("{SELECT} ORDER BY name");
    let halls = sqlx::query_as::<_, EventHall>(&sql).fetch_all(pool).await?;
    Ok(halls)
}

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<EventHall>> {
    let sql = format!("{SELECT} WHERE id = ?");
    let hall = sqlx::query_as::<_, EventHall>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(hall)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<EventHall>> {
    let sql = format!("{SELECT} WHERE name = ? COLLATE NOCASE LIMIT 1");
    let hall = sqlx::query_as::<_, EventHall>(&sql)
        .bind(name.trim())
        .fetch_optional(pool)
        .await?;
    Ok(hall)
}

pub async fn create(pool: &SqlitePool, data: EventHallCreate) -> RepoResult<EventHall> {
    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Event hall '{}' already exists",
            data.name
        )));
    }

    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO event_hall (id, name, capacity, price_per_hour, available) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(data.capacity)
    .bind(data.price_per_hour)
    .bind(data.available.unwrap_or(true))
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create event hall".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: EventHallUpdate) -> RepoResult<EventHall> {
    if let Some(name) = &data.name
        && let Some(found) = find_by_name(pool, name).await?
        && found.id != id
    {
        return Err(RepoError::Duplicate(format!(
            "Event hall '{}' already exists",
            name
        )));
    }

    let rows = sqlx::query(
        "UPDATE event_hall SET name = COALESCE(?1, name), capacity = COALESCE(?2, capacity), price_per_hour = COALESCE(?3, price_per_hour), available = COALESCE(?4, available) WHERE id = ?5",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.capacity)
    .bind(data.price_per_hour)
    .bind(data.available)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Event hall {id} not found")));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Event hall {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM event_hall WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Flip the hall to booked if it is currently available.
/// Returns false when the hall is missing or already booked.
pub async fn reserve(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE event_hall SET available = 0 WHERE id = ? AND available = 1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected() == 1)
}

/// Mark the hall available again. Returns false when the hall no longer exists.
pub async fn release(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE event_hall SET available = 1 WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected() == 1)
}
