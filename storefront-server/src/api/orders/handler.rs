//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::models::{Order, OrderCreate, OrderStatus, OrderStatusUpdate};

use crate::api::MessageResponse;
use crate::auth::{SessionContext, assert_owner};
use crate::core::ServerState;
use crate::db::repository::order::NewOrder;
use crate::db::repository::{dining_table, order, product};
use crate::utils::validation::validate_quantity;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Create / status update response
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub message: String,
    pub order: Order,
}

/// POST /api/orders - 直接下单
///
/// The total is frozen from the product's current price.
pub async fn create(
    State(state): State<ServerState>,
    session: SessionContext,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderResponse>> {
    let identity = session.require_identity()?;
    validate_quantity(payload.quantity)?;

    let item = product::find_by_id(&state.pool, payload.product_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ProductNotFound,
                format!("Product {} not found", payload.product_id),
            )
        })?;
    assert_owner(item.user_id, identity, "product")?;

    if let Some(table_id) = payload.table_id {
        dining_table::find_by_id(&state.pool, table_id)
            .await?
            .ok_or_else(|| table_not_found(table_id))?;
    }

    let total_price = item
        .price
        .checked_mul(payload.quantity)
        .ok_or_else(|| AppError::validation("Order total is out of range"))?;

    let created = order::insert(
        &state.pool,
        &NewOrder {
            user_id: Some(identity.user_id),
            product_id: item.id,
            table_id: payload.table_id,
            quantity: payload.quantity,
            total_price,
        },
    )
    .await?;

    tracing::info!(order_id = created.id, user_id = identity.user_id, total_price, "Order created");
    Ok(Json(OrderResponse {
        message: "Order created successfully".into(),
        order: created,
    }))
}

/// GET /api/orders - 全部订单
///
/// Not owner-scoped: guest orders have no owner and must stay visible.
pub async fn list(
    State(state): State<ServerState>,
    session: SessionContext,
) -> AppResult<Json<Vec<Order>>> {
    session.require_identity()?;
    let orders = order::find_all(&state.pool).await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - 订单详情 (仅本人)
pub async fn get_by_id(
    State(state): State<ServerState>,
    session: SessionContext,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let identity = session.require_identity()?;
    let found = order::find_by_id_for_user(&state.pool, id, identity.user_id)
        .await?
        .ok_or_else(|| order_not_found(id))?;
    Ok(Json(found))
}

/// PATCH /api/orders/:id/status - 修改订单状态
///
/// Any known status may be written. Moving an order out of a terminal
/// state is allowed and logged.
pub async fn update_status(
    State(state): State<ServerState>,
    session: SessionContext,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<OrderResponse>> {
    let identity = session.require_identity()?;
    let status: OrderStatus = payload.status.parse().map_err(|_| {
        AppError::with_message(
            ErrorCode::InvalidOrderStatus,
            format!(
                "Invalid status '{}'. Allowed: pending, completed, cancelled",
                payload.status
            ),
        )
    })?;

    let previous = order::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| order_not_found(id))?;
    if previous.status.is_terminal() && previous.status != status {
        tracing::warn!(
            order_id = id,
            from = %previous.status,
            to = %status,
            user_id = identity.user_id,
            "Order leaves terminal status"
        );
    }

    let updated = order::update_status(&state.pool, id, status)
        .await?
        .ok_or_else(|| order_not_found(id))?;
    Ok(Json(OrderResponse {
        message: "Order status updated".into(),
        order: updated,
    }))
}

/// DELETE /api/orders/:id - 删除订单 (仅本人)
pub async fn delete(
    State(state): State<ServerState>,
    session: SessionContext,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    let identity = session.require_identity()?;
    if !order::delete_for_user(&state.pool, id, identity.user_id).await? {
        return Err(order_not_found(id));
    }
    tracing::info!(order_id = id, user_id = identity.user_id, "Order deleted");
    Ok(Json(MessageResponse::new("Order deleted successfully")))
}

fn order_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
}

fn table_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::TableNotFound, format!("Table {id} not found"))
}
