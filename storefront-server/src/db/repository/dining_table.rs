//! Dining Table Repository

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, TableStatus};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const TABLE_COLUMNS: &str = "id, table_number, capacity, status, created_at, updated_at";

/// All tables (active and inactive), ordered by number
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("SELECT {TABLE_COLUMNS} FROM dining_table ORDER BY table_number ASC");
    let tables = sqlx::query_as::<_, DiningTable>(&sql).fetch_all(pool).await?;
    Ok(tables)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let sql = format!("SELECT {TABLE_COLUMNS} FROM dining_table WHERE id = ?");
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(table)
}

pub async fn find_by_number(pool: &SqlitePool, number: i64) -> RepoResult<Option<DiningTable>> {
    let sql = format!("SELECT {TABLE_COLUMNS} FROM dining_table WHERE table_number = ? LIMIT 1");
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(number)
        .fetch_optional(pool)
        .await?;
    Ok(table)
}

pub async fn create(
    pool: &SqlitePool,
    table_number: i64,
    capacity: i64,
    status: TableStatus,
) -> RepoResult<DiningTable> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO dining_table (id, table_number, capacity, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
    )
    .bind(id)
    .bind(table_number)
    .bind(capacity)
    .bind(status)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create table".into()))
}

/// Partial update; `None` fields are left untouched
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    table_number: Option<i64>,
    capacity: Option<i64>,
    status: Option<TableStatus>,
) -> RepoResult<DiningTable> {
    let rows = sqlx::query(
        "UPDATE dining_table SET table_number = COALESCE(?1, table_number), capacity = COALESCE(?2, capacity), status = COALESCE(?3, status), updated_at = ?4 WHERE id = ?5",
    )
    .bind(table_number)
    .bind(capacity)
    .bind(status)
    .bind(now_millis())
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
