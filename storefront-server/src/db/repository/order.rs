//! Order Repository

use super::RepoResult;
use shared::models::{Order, OrderStatus};
use shared::util::{now_millis, snowflake_id};
use sqlx::{SqliteExecutor, SqlitePool};

const ORDER_COLUMNS: &str =
    "id, user_id, product_id, table_id, quantity, total_price, status, created_at, updated_at";

/// Values for a new order row; `total_price` is already frozen by the caller
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Option<i64>,
    pub product_id: i64,
    pub table_id: Option<i64>,
    pub quantity: i64,
    pub total_price: i64,
}

/// Insert a pending order
pub async fn insert<'e, E>(executor: E, order: &NewOrder) -> RepoResult<Order>
where
    E: SqliteExecutor<'e>,
{
    let now = now_millis();
    let sql = format!(
        "INSERT INTO orders (id, user_id, product_id, table_id, quantity, total_price, status, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8) RETURNING {ORDER_COLUMNS}"
    );
    let created = sqlx::query_as::<_, Order>(&sql)
        .bind(snowflake_id())
        .bind(order.user_id)
        .bind(order.product_id)
        .bind(order.table_id)
        .bind(order.quantity)
        .bind(order.total_price)
        .bind(OrderStatus::Pending)
        .bind(now)
        .fetch_one(executor)
        .await?;
    Ok(created)
}

/// Every order, newest first (operator view, includes guest orders)
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, id DESC");
    let orders = sqlx::query_as::<_, Order>(&sql).fetch_all(pool).await?;
    Ok(orders)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

/// Owner-scoped lookup; other users' and guest orders are not visible
pub async fn find_by_id_for_user(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
) -> RepoResult<Option<Order>> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ? AND user_id = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

pub async fn find_by_table(pool: &SqlitePool, table_id: i64) -> RepoResult<Vec<Order>> {
    let sql = format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE table_id = ? ORDER BY created_at DESC, id DESC"
    );
    let orders = sqlx::query_as::<_, Order>(&sql)
        .bind(table_id)
        .fetch_all(pool)
        .await?;
    Ok(orders)
}

/// Overwrite the status; returns the updated order, `None` if absent
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: OrderStatus,
) -> RepoResult<Option<Order>> {
    let sql = format!(
        "UPDATE orders SET status = ?, updated_at = ? WHERE id = ? RETURNING {ORDER_COLUMNS}"
    );
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(status)
        .bind(now_millis())
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

pub async fn delete_for_user(pool: &SqlitePool, id: i64, user_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM orders WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{seed_product, seed_user, test_pool};

    fn new_order(user_id: Option<i64>, product_id: i64) -> NewOrder {
        NewOrder {
            user_id,
            product_id,
            table_id: None,
            quantity: 2,
            total_price: 600,
        }
    }

    #[tokio::test]
    async fn test_insert_is_pending() {
        let pool = test_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let tea = seed_product(&pool, alice.id, "Tea", 300).await;

        let order = insert(&pool, &new_order(None, tea)).await.unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_price, 600);
        assert!(order.user_id.is_none());
    }

    #[tokio::test]
    async fn test_back_to_back_inserts_get_distinct_ids() {
        let pool = test_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let tea = seed_product(&pool, alice.id, "Tea", 300).await;

        for _ in 0..2000 {
            insert(&pool, &new_order(None, tea)).await.unwrap();
        }
        assert_eq!(find_all(&pool).await.unwrap().len(), 2000);
    }

    #[tokio::test]
    async fn test_owner_scoping_and_global_listing() {
        let pool = test_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let bob = seed_user(&pool, "bob").await;
        let tea = seed_product(&pool, alice.id, "Tea", 300).await;

        let mine = insert(&pool, &new_order(Some(alice.id), tea)).await.unwrap();
        insert(&pool, &new_order(None, tea)).await.unwrap();

        assert!(find_by_id_for_user(&pool, mine.id, alice.id).await.unwrap().is_some());
        assert!(find_by_id_for_user(&pool, mine.id, bob.id).await.unwrap().is_none());
        assert!(!delete_for_user(&pool, mine.id, bob.id).await.unwrap());

        assert_eq!(find_all(&pool).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_status_overwrites() {
        let pool = test_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let tea = seed_product(&pool, alice.id, "Tea", 300).await;
        let order = insert(&pool, &new_order(Some(alice.id), tea)).await.unwrap();

        let done = update_status(&pool, order.id, OrderStatus::Cancelled)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(done.status, OrderStatus::Cancelled);
        assert_eq!(done.total_price, 600);

        assert!(update_status(&pool, 1, OrderStatus::Completed).await.unwrap().is_none());
    }
}
