//! Admin Account Repository

use super::{RepoError, RepoResult};
use shared::models::Admin;
use sqlx::SqlitePool;

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Admin>> {
    let admin = sqlx::query_as::<_, Admin>(
        "SELECT id, email, password_hash, created_at FROM admins WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(admin)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, email: &str, password_hash: &str) -> RepoResult<Admin> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query("INSERT INTO admins (id, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .bind(now)
        .execute(pool)
        .await?;
    find_by_email(pool, email)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create admin".into()))
}
