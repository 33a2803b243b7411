//! Session Repository
//!
//! Rows are keyed by the SHA-256 of the cookie token, so a leaked database
//! does not leak live session cookies.

use super::RepoResult;
use sqlx::SqlitePool;

/// Persisted session state
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionRecord {
    pub token_hash: String,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub cart_id: Option<String>,
    pub created_at: i64,
    pub expires_at: i64,
}

/// Look up a session that has not expired at `now`
pub async fn find_active(
    pool: &SqlitePool,
    token_hash: &str,
    now: i64,
) -> RepoResult<Option<SessionRecord>> {
    let record = sqlx::query_as::<_, SessionRecord>(
        "SELECT token_hash, user_id, username, cart_id, created_at, expires_at FROM session WHERE token_hash = ? AND expires_at > ?",
    )
    .bind(token_hash)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

pub async fn insert(pool: &SqlitePool, record: &SessionRecord) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO session (token_hash, user_id, username, cart_id, created_at, expires_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&record.token_hash)
    .bind(record.user_id)
    .bind(&record.username)
    .bind(&record.cart_id)
    .bind(record.created_at)
    .bind(record.expires_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn set_cart_id(pool: &SqlitePool, token_hash: &str, cart_id: &str) -> RepoResult<()> {
    sqlx::query("UPDATE session SET cart_id = ? WHERE token_hash = ?")
        .bind(cart_id)
        .bind(token_hash)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete(pool: &SqlitePool, token_hash: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM session WHERE token_hash = ?")
        .bind(token_hash)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Remove every session expired at `now`; returns the number removed
pub async fn purge_expired(pool: &SqlitePool, now: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM session WHERE expires_at <= ?")
        .bind(now)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}
