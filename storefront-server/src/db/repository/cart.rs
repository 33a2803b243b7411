//! Cart Repository
//!
//! Every query is scoped by `cart_id`: an item that exists under another
//! cart is indistinguishable from a missing one.

use super::{RepoError, RepoResult};
use shared::models::{CartItem, CartLine, Product};
use shared::util::{now_millis, snowflake_id};
use sqlx::{SqliteExecutor, SqlitePool};

/// Flat join row (cart_item x product)
#[derive(sqlx::FromRow)]
struct CartLineRow {
    id: i64,
    cart_id: String,
    product_id: i64,
    quantity: i64,
    p_user_id: i64,
    p_name: String,
    p_price: i64,
    p_image: String,
    p_labels: String,
    p_created_at: i64,
    p_updated_at: i64,
}

impl From<CartLineRow> for CartLine {
    fn from(row: CartLineRow) -> Self {
        CartLine {
            id: row.id,
            cart_id: row.cart_id,
            product_id: row.product_id,
            quantity: row.quantity,
            product: Product {
                id: row.product_id,
                user_id: row.p_user_id,
                name: row.p_name,
                price: row.p_price,
                image: row.p_image,
                labels: row.p_labels,
                created_at: row.p_created_at,
                updated_at: row.p_updated_at,
            },
        }
    }
}

const LINE_SELECT: &str = "SELECT ci.id, ci.cart_id, ci.product_id, ci.quantity, \
     p.user_id AS p_user_id, p.name AS p_name, p.price AS p_price, p.image AS p_image, \
     p.labels AS p_labels, p.created_at AS p_created_at, p.updated_at AS p_updated_at \
     FROM cart_item ci JOIN product p ON p.id = ci.product_id";

/// All lines of a cart with their products, in insertion order
pub async fn find_lines<'e, E>(executor: E, cart_id: &str) -> RepoResult<Vec<CartLine>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{LINE_SELECT} WHERE ci.cart_id = ? ORDER BY ci.created_at, ci.id");
    let rows = sqlx::query_as::<_, CartLineRow>(&sql)
        .bind(cart_id)
        .fetch_all(executor)
        .await?;
    Ok(rows.into_iter().map(CartLine::from).collect())
}

pub async fn find_line(
    pool: &SqlitePool,
    cart_id: &str,
    item_id: i64,
) -> RepoResult<Option<CartLine>> {
    let sql = format!("{LINE_SELECT} WHERE ci.cart_id = ? AND ci.id = ?");
    let row = sqlx::query_as::<_, CartLineRow>(&sql)
        .bind(cart_id)
        .bind(item_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(CartLine::from))
}

/// Insert a line, or add `quantity` to the existing line for the same product
///
/// A single upsert statement, so two concurrent adds cannot create two rows.
/// A merge that would push the line above `max_quantity` changes nothing and
/// returns `Validation`.
pub async fn add_or_merge(
    pool: &SqlitePool,
    cart_id: &str,
    product_id: i64,
    quantity: i64,
    max_quantity: i64,
) -> RepoResult<CartItem> {
    let now = now_millis();
    let item = sqlx::query_as::<_, CartItem>(
        "INSERT INTO cart_item (id, cart_id, product_id, quantity, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
         ON CONFLICT(cart_id, product_id) DO UPDATE SET quantity = quantity + excluded.quantity, updated_at = excluded.updated_at \
         WHERE cart_item.quantity <= ?6 - excluded.quantity \
         RETURNING id, cart_id, product_id, quantity, created_at, updated_at",
    )
    .bind(snowflake_id())
    .bind(cart_id)
    .bind(product_id)
    .bind(quantity)
    .bind(now)
    .bind(max_quantity)
    .fetch_optional(pool)
    .await?;
    item.ok_or_else(|| {
        RepoError::Validation(format!(
            "Merged quantity for product {product_id} would exceed {max_quantity}"
        ))
    })
}

pub async fn update_quantity(
    pool: &SqlitePool,
    cart_id: &str,
    item_id: i64,
    quantity: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE cart_item SET quantity = ?, updated_at = ? WHERE id = ? AND cart_id = ?",
    )
    .bind(quantity)
    .bind(now_millis())
    .bind(item_id)
    .bind(cart_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Cart item {item_id} not found")));
    }
    Ok(())
}

pub async fn remove(pool: &SqlitePool, cart_id: &str, item_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM cart_item WHERE id = ? AND cart_id = ?")
        .bind(item_id)
        .bind(cart_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Delete every line of a cart; returns the number removed
pub async fn clear<'e, E>(executor: E, cart_id: &str) -> RepoResult<u64>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query("DELETE FROM cart_item WHERE cart_id = ?")
        .bind(cart_id)
        .execute(executor)
        .await?;
    Ok(rows.rows_affected())
}
