//! Product Repository

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const PRODUCT_COLUMNS: &str = "id, user_id, name, price, image, labels, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM product WHERE id = ?");
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(product)
}

/// Products owned by `user_id`, newest first
pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Product>> {
    let sql = format!(
        "SELECT {PRODUCT_COLUMNS} FROM product WHERE user_id = ? ORDER BY created_at DESC, id DESC"
    );
    let products = sqlx::query_as::<_, Product>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(products)
}

pub async fn create(pool: &SqlitePool, user_id: i64, data: ProductCreate) -> RepoResult<Product> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO product (id, user_id, name, price, image, labels, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(user_id)
    .bind(&data.name)
    .bind(data.price)
    .bind(&data.image)
    .bind(&data.labels)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    let rows = sqlx::query(
        "UPDATE product SET name = COALESCE(?1, name), price = COALESCE(?2, price), labels = COALESCE(?3, labels), updated_at = ?4 WHERE id = ?5",
    )
    .bind(data.name)
    .bind(data.price)
    .bind(data.labels)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// Hard delete; cart lines go with it, orders keep their frozen totals
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
