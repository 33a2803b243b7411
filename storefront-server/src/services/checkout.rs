//! Checkout Transaction
//!
//! Converts every line of a cart into a pending order and empties the cart,
//! all inside one SQLite transaction:
//!
//! 1. snapshot the cart lines joined with their products
//! 2. insert one order per line with `total_price = price x quantity`
//! 3. delete the cart lines
//! 4. commit
//!
//! Any failure drops the transaction, which rolls everything back: no order
//! from a failed checkout is ever visible and the cart keeps its lines.
//! SQLite transactions are serializable, so lines added to the cart by a
//! concurrent request are either fully in the snapshot or not at all.

use shared::models::CheckoutReceipt;
use sqlx::SqlitePool;

use crate::db::repository::order::NewOrder;
use crate::db::repository::{RepoError, cart, order};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Check out `cart_id`; `user_id` is `None` for guest checkouts
pub async fn checkout(
    pool: &SqlitePool,
    cart_id: &str,
    user_id: Option<i64>,
) -> AppResult<CheckoutReceipt> {
    let mut tx = pool.begin().await.map_err(|e| failed("begin", e.into()))?;

    let lines = cart::find_lines(&mut *tx, cart_id)
        .await
        .map_err(|e| failed("snapshot", e))?;
    if lines.is_empty() {
        return Err(AppError::new(ErrorCode::CartEmpty));
    }

    let mut orders = Vec::with_capacity(lines.len());
    let mut total_amount: i64 = 0;
    for line in &lines {
        let total_price = line
            .line_total()
            .ok_or_else(|| AppError::with_message(ErrorCode::CheckoutFailed, "Order total overflow"))?;
        total_amount = total_amount
            .checked_add(total_price)
            .ok_or_else(|| AppError::with_message(ErrorCode::CheckoutFailed, "Order total overflow"))?;
        let new_order = NewOrder {
            user_id,
            product_id: line.product_id,
            table_id: None,
            quantity: line.quantity,
            total_price,
        };
        let created = order::insert(&mut *tx, &new_order)
            .await
            .map_err(|e| failed("create order", e))?;
        orders.push(created);
    }

    cart::clear(&mut *tx, cart_id)
        .await
        .map_err(|e| failed("clear cart", e))?;

    tx.commit().await.map_err(|e| failed("commit", e.into()))?;

    let order_count = orders.len();
    tracing::info!(
        cart_id = %cart_id,
        user_id = ?user_id,
        order_count,
        total_amount,
        "Checkout completed"
    );

    Ok(CheckoutReceipt {
        message: "Checkout successful".to_string(),
        orders,
        total_amount,
        order_count,
    })
}

fn failed(step: &str, err: RepoError) -> AppError {
    tracing::error!(step, error = %err, "Checkout rolled back");
    AppError::new(ErrorCode::CheckoutFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::{seed_product, seed_user, test_pool};
    use shared::models::OrderStatus;

    #[tokio::test]
    async fn test_checkout_converts_every_line() {
        let pool = test_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let tea = seed_product(&pool, alice.id, "Tea", 300).await;
        let cake = seed_product(&pool, alice.id, "Cake", 450).await;
        cart::add_or_merge(&pool, "cart-1", tea, 2, 10_000).await.unwrap();
        cart::add_or_merge(&pool, "cart-1", cake, 1, 10_000).await.unwrap();

        let receipt = checkout(&pool, "cart-1", Some(alice.id)).await.unwrap();
        assert_eq!(receipt.order_count, 2);
        assert_eq!(receipt.total_amount, 1050);
        assert!(receipt
            .orders
            .iter()
            .all(|o| o.status == OrderStatus::Pending && o.user_id == Some(alice.id)));

        assert!(cart::find_lines(&pool, "cart-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_totals_are_frozen_at_checkout() {
        let pool = test_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let tea = seed_product(&pool, alice.id, "Tea", 300).await;
        cart::add_or_merge(&pool, "cart-1", tea, 2, 10_000).await.unwrap();

        let receipt = checkout(&pool, "cart-1", None).await.unwrap();
        sqlx::query("UPDATE product SET price = 999 WHERE id = ?")
            .bind(tea)
            .execute(&pool)
            .await
            .unwrap();

        let stored = order::find_by_id(&pool, receipt.orders[0].id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.total_price, 600);
        assert!(stored.user_id.is_none());
    }

    #[tokio::test]
    async fn test_empty_cart_has_no_side_effects() {
        let pool = test_pool().await;
        let err = checkout(&pool, "nothing-here", None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CartEmpty);
        assert!(order::find_all(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_mid_checkout_rolls_back() {
        let pool = test_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let tea = seed_product(&pool, alice.id, "Tea", 300).await;
        let cake = seed_product(&pool, alice.id, "Cake", 450).await;
        cart::add_or_merge(&pool, "cart-1", tea, 2, 10_000).await.unwrap();
        // distinct created_at keeps the snapshot order tea, cake
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        cart::add_or_merge(&pool, "cart-1", cake, 1, 10_000).await.unwrap();

        // The second order insert fails after the first one succeeded
        sqlx::query(&format!(
            "CREATE TRIGGER fail_cake BEFORE INSERT ON orders WHEN NEW.product_id = {cake} \
             BEGIN SELECT RAISE(ABORT, 'boom'); END"
        ))
        .execute(&pool)
        .await
        .unwrap();

        let err = checkout(&pool, "cart-1", None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CheckoutFailed);

        assert!(order::find_all(&pool).await.unwrap().is_empty());
        let lines = cart::find_lines(&pool, "cart-1").await.unwrap();
        assert_eq!(lines.len(), 2);
    }

    #[tokio::test]
    async fn test_other_carts_untouched() {
        let pool = test_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let tea = seed_product(&pool, alice.id, "Tea", 300).await;
        cart::add_or_merge(&pool, "cart-1", tea, 1, 10_000).await.unwrap();
        cart::add_or_merge(&pool, "cart-2", tea, 4, 10_000).await.unwrap();

        checkout(&pool, "cart-1", None).await.unwrap();
        let other = cart::find_lines(&pool, "cart-2").await.unwrap();
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].quantity, 4);
    }

    #[tokio::test]
    async fn test_large_cart_checks_out_in_full() {
        let pool = test_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let mut expected = 0;
        for i in 0..300 {
            let price = 100 + i;
            let product = seed_product(&pool, alice.id, &format!("Item {i}"), price).await;
            cart::add_or_merge(&pool, "big-cart", product, 2, 10_000).await.unwrap();
            expected += price * 2;
        }

        let receipt = checkout(&pool, "big-cart", Some(alice.id)).await.unwrap();
        assert_eq!(receipt.order_count, 300);
        assert_eq!(receipt.total_amount, expected);
        assert_eq!(order::find_all(&pool).await.unwrap().len(), 300);
        assert!(cart::find_lines(&pool, "big-cart").await.unwrap().is_empty());
    }
}
