//! Cart API Handlers
//!
//! Every handler resolves the session's cart id first (minting it on first
//! use) and returns the session cookie when one had to be created.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::models::{CartItemAdd, CartItemUpdate, CartLine, CartSummary, CheckoutReceipt};

use crate::api::MessageResponse;
use crate::auth::{SessionContext, SetSessionCookie};
use crate::core::ServerState;
use crate::db::repository::{RepoError, cart, product};
use crate::services::checkout;
use crate::utils::validation::{MAX_QUANTITY, validate_quantity};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Add / update response
#[derive(Debug, Serialize)]
pub struct CartItemResponse {
    pub message: String,
    pub item: CartLine,
}

/// POST /api/cart - 加入购物车
pub async fn add(
    State(state): State<ServerState>,
    mut session: SessionContext,
    Json(payload): Json<CartItemAdd>,
) -> AppResult<(SetSessionCookie, Json<CartItemResponse>)> {
    validate_quantity(payload.quantity)?;
    let cart_id = session.ensure_cart_id(&state).await?;

    if product::find_by_id(&state.pool, payload.product_id)
        .await?
        .is_none()
    {
        return Err(AppError::with_message(
            ErrorCode::ProductNotFound,
            format!("Product {} not found", payload.product_id),
        ));
    }

    let stored = cart::add_or_merge(
        &state.pool,
        &cart_id,
        payload.product_id,
        payload.quantity,
        MAX_QUANTITY,
    )
    .await
    .map_err(|e| match e {
        RepoError::Validation(msg) => AppError::with_message(ErrorCode::InvalidQuantity, msg),
        other => other.into(),
    })?;
    let item = load_line(&state, &cart_id, stored.id).await?;

    tracing::debug!(
        cart_id = %cart_id,
        product_id = payload.product_id,
        quantity = item.quantity,
        "Cart line added"
    );
    Ok((
        session.set_cookie(),
        Json(CartItemResponse {
            message: "Item added to cart".into(),
            item,
        }),
    ))
}

/// GET /api/cart - 购物车内容
pub async fn list(
    State(state): State<ServerState>,
    mut session: SessionContext,
) -> AppResult<(SetSessionCookie, Json<CartSummary>)> {
    let cart_id = session.ensure_cart_id(&state).await?;
    let lines = cart::find_lines(&state.pool, &cart_id).await?;
    let summary = CartSummary::from_lines(lines)
        .ok_or_else(|| AppError::validation("Cart total exceeds the supported range"))?;
    Ok((session.set_cookie(), Json(summary)))
}

/// PATCH /api/cart/:id - 修改数量
pub async fn update(
    State(state): State<ServerState>,
    mut session: SessionContext,
    Path(id): Path<i64>,
    Json(payload): Json<CartItemUpdate>,
) -> AppResult<(SetSessionCookie, Json<CartItemResponse>)> {
    validate_quantity(payload.quantity)?;
    let cart_id = session.ensure_cart_id(&state).await?;

    cart::update_quantity(&state.pool, &cart_id, id, payload.quantity)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => item_not_found(id),
            other => other.into(),
        })?;
    let item = load_line(&state, &cart_id, id).await?;

    Ok((
        session.set_cookie(),
        Json(CartItemResponse {
            message: "Cart item updated".into(),
            item,
        }),
    ))
}

/// DELETE /api/cart/:id - 移除一行
pub async fn remove(
    State(state): State<ServerState>,
    mut session: SessionContext,
    Path(id): Path<i64>,
) -> AppResult<(SetSessionCookie, Json<MessageResponse>)> {
    let cart_id = session.ensure_cart_id(&state).await?;
    if !cart::remove(&state.pool, &cart_id, id).await? {
        return Err(item_not_found(id));
    }
    Ok((
        session.set_cookie(),
        Json(MessageResponse::new("Item removed from cart")),
    ))
}

/// DELETE /api/cart/clear - 清空购物车
pub async fn clear(
    State(state): State<ServerState>,
    mut session: SessionContext,
) -> AppResult<(SetSessionCookie, Json<MessageResponse>)> {
    let cart_id = session.ensure_cart_id(&state).await?;
    let removed = cart::clear(&state.pool, &cart_id).await?;
    tracing::debug!(cart_id = %cart_id, removed, "Cart cleared");
    Ok((session.set_cookie(), Json(MessageResponse::new("Cart cleared"))))
}

/// POST /api/cart/checkout - 结账
///
/// Guests check out too; their orders carry no user id.
pub async fn checkout(
    State(state): State<ServerState>,
    mut session: SessionContext,
) -> AppResult<(SetSessionCookie, Json<CheckoutReceipt>)> {
    let cart_id = session.ensure_cart_id(&state).await?;
    let user_id = session.identity.as_ref().map(|identity| identity.user_id);
    let receipt = checkout::checkout(&state.pool, &cart_id, user_id).await?;
    Ok((session.set_cookie(), Json(receipt)))
}

async fn load_line(state: &ServerState, cart_id: &str, id: i64) -> AppResult<CartLine> {
    cart::find_line(&state.pool, cart_id, id)
        .await?
        .ok_or_else(|| item_not_found(id))
}

fn item_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::CartItemNotFound, format!("Cart item {id} not found"))
}
