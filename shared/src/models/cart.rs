//! Cart Model

use serde::{Deserialize, Serialize};

use super::Product;

/// Cart line as stored
///
/// `cart_id` is the session's cart-correlation id, never a user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartItem {
    pub id: i64,
    pub cart_id: String,
    pub product_id: i64,
    pub quantity: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Cart line with its product resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub id: i64,
    pub cart_id: String,
    pub product_id: i64,
    pub quantity: i64,
    pub product: Product,
}

impl CartLine {
    /// Live line total from the current product price; `None` on overflow
    pub fn line_total(&self) -> Option<i64> {
        self.product.price.checked_mul(self.quantity)
    }
}

/// Full cart view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSummary {
    pub items: Vec<CartLine>,
    pub total_price: i64,
    pub item_count: usize,
}

impl CartSummary {
    /// Build the view, or `None` if the total does not fit in an i64
    pub fn from_lines(items: Vec<CartLine>) -> Option<Self> {
        let total_price = items
            .iter()
            .try_fold(0_i64, |acc, line| acc.checked_add(line.line_total()?))?;
        let item_count = items.len();
        Some(Self {
            items,
            total_price,
            item_count,
        })
    }
}

/// Add-to-cart payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemAdd {
    pub product_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// Change-quantity payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemUpdate {
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: i64, quantity: i64) -> CartLine {
        CartLine {
            id: 1,
            cart_id: "c".into(),
            product_id: 1,
            quantity,
            product: Product {
                id: 1,
                user_id: 1,
                name: "Tea".into(),
                price,
                image: String::new(),
                labels: String::new(),
                created_at: 0,
                updated_at: 0,
            },
        }
    }

    #[test]
    fn test_summary_totals() {
        let summary = CartSummary::from_lines(vec![line(300, 2), line(150, 3)]).unwrap();
        assert_eq!(summary.total_price, 1050);
        assert_eq!(summary.item_count, 2);
    }

    #[test]
    fn test_empty_summary() {
        let summary = CartSummary::from_lines(Vec::new()).unwrap();
        assert_eq!(summary.total_price, 0);
        assert_eq!(summary.item_count, 0);
    }

    #[test]
    fn test_overflowing_totals_are_rejected() {
        assert!(line(300, i64::MAX / 2).line_total().is_none());
        assert!(CartSummary::from_lines(vec![line(300, i64::MAX / 2)]).is_none());
        assert!(CartSummary::from_lines(vec![line(i64::MAX, 1), line(1, 1)]).is_none());
    }

    #[test]
    fn test_add_payload_defaults_quantity() {
        let add: CartItemAdd = serde_json::from_str(r#"{"product_id": 7}"#).unwrap();
        assert_eq!(add.quantity, 1);
    }
}
