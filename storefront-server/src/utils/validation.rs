//! Input validation helpers
//!
//! Centralized text length limits and checks shared by the handlers.
//! SQLite TEXT has no built-in length enforcement.

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Usernames
pub const MAX_USERNAME_LEN: usize = 100;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Entity names: product, page
pub const MAX_NAME_LEN: usize = 200;

/// Free-text labels
pub const MAX_LABELS_LEN: usize = 500;

/// Stored chat API keys
pub const MAX_API_KEY_LEN: usize = 512;

/// HTML page bodies (1 MB)
pub const MAX_PAGE_CONTENT_LEN: usize = 1024 * 1024;

/// Per-line quantity ceiling for carts and orders
pub const MAX_QUANTITY: i64 = 10_000;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        )
        .with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Quantities on cart lines and orders must be in `1..=MAX_QUANTITY`.
pub fn validate_quantity(quantity: i64) -> Result<(), AppError> {
    if quantity < 1 {
        return Err(AppError::new(ErrorCode::InvalidQuantity).with_detail("quantity", quantity));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::with_message(
            ErrorCode::InvalidQuantity,
            format!("Quantity must not exceed {MAX_QUANTITY}"),
        )
        .with_detail("quantity", quantity));
    }
    Ok(())
}

/// Parse a price in the smallest currency unit; malformed or negative input is rejected.
pub fn parse_price(raw: &str) -> Result<i64, AppError> {
    match raw.trim().parse::<i64>() {
        Ok(price) if price >= 0 => Ok(price),
        _ => Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("Invalid price: '{}'", raw.trim()),
        )),
    }
}

/// Validate an already-numeric price.
pub fn validate_price(price: i64) -> Result<(), AppError> {
    if price < 0 {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            "Price must not be negative",
        ));
    }
    Ok(())
}
