//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::models::{
    DEFAULT_TABLE_CAPACITY, DiningTable, DiningTableCreate, DiningTableUpdate, Order, TableStatus,
};

use crate::api::MessageResponse;
use crate::auth::SessionContext;
use crate::core::ServerState;
use crate::db::repository::{RepoError, dining_table, order};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Table with its orders
#[derive(Debug, Serialize)]
pub struct TableOrdersResponse {
    pub table: DiningTable,
    pub orders: Vec<Order>,
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    session: SessionContext,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    session.require_identity()?;

    let table_number = payload.table_number.ok_or_else(|| {
        AppError::with_message(ErrorCode::RequiredField, "table_number is required")
            .with_detail("field", "table_number")
    })?;
    validate_table_number(table_number)?;
    let capacity = payload.capacity.unwrap_or(DEFAULT_TABLE_CAPACITY);
    validate_capacity(capacity)?;
    let status = parse_status(payload.status.as_deref())?.unwrap_or_default();

    ensure_number_free(&state, table_number, None).await?;

    let created = dining_table::create(&state.pool, table_number, capacity, status)
        .await
        .map_err(|e| number_conflict(e, table_number))?;
    tracing::info!(table_id = created.id, table_number, "Table created");
    Ok(Json(created))
}

/// GET /api/tables - 桌台列表
pub async fn list(
    State(state): State<ServerState>,
    session: SessionContext,
) -> AppResult<Json<Vec<DiningTable>>> {
    session.require_identity()?;
    let tables = dining_table::find_all(&state.pool).await?;
    Ok(Json(tables))
}

/// GET /api/tables/:id - 桌台详情
pub async fn get_by_id(
    State(state): State<ServerState>,
    session: SessionContext,
    Path(id): Path<i64>,
) -> AppResult<Json<DiningTable>> {
    session.require_identity()?;
    Ok(Json(find_table(&state, id).await?))
}

/// PATCH /api/tables/:id - 部分更新
pub async fn update(
    State(state): State<ServerState>,
    session: SessionContext,
    Path(id): Path<i64>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    session.require_identity()?;
    find_table(&state, id).await?;

    if let Some(number) = payload.table_number {
        validate_table_number(number)?;
        ensure_number_free(&state, number, Some(id)).await?;
    }
    if let Some(capacity) = payload.capacity {
        validate_capacity(capacity)?;
    }
    let status = parse_status(payload.status.as_deref())?;

    let updated = dining_table::update(&state.pool, id, payload.table_number, payload.capacity, status)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => table_not_found(id),
            other => number_conflict(other, payload.table_number.unwrap_or_default()),
        })?;
    Ok(Json(updated))
}

/// DELETE /api/tables/:id - 停用桌台
///
/// The row stays so orders can keep referring to it.
pub async fn delete(
    State(state): State<ServerState>,
    session: SessionContext,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    session.require_identity()?;
    dining_table::update(&state.pool, id, None, None, Some(TableStatus::Inactive))
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => table_not_found(id),
            other => other.into(),
        })?;
    tracing::info!(table_id = id, "Table deactivated");
    Ok(Json(MessageResponse::new("Table deactivated")))
}

/// GET /api/tables/:id/orders - 桌台订单
pub async fn list_orders(
    State(state): State<ServerState>,
    session: SessionContext,
    Path(id): Path<i64>,
) -> AppResult<Json<TableOrdersResponse>> {
    session.require_identity()?;
    let table = find_table(&state, id).await?;
    let orders = order::find_by_table(&state.pool, id).await?;
    Ok(Json(TableOrdersResponse { table, orders }))
}

async fn find_table(state: &ServerState, id: i64) -> AppResult<DiningTable> {
    dining_table::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| table_not_found(id))
}

/// Conflict if `number` belongs to a table other than `except`
async fn ensure_number_free(state: &ServerState, number: i64, except: Option<i64>) -> AppResult<()> {
    match dining_table::find_by_number(&state.pool, number).await? {
        Some(existing) if Some(existing.id) != except => Err(AppError::with_message(
            ErrorCode::TableNumberExists,
            format!("Table number {number} already exists"),
        )),
        _ => Ok(()),
    }
}

fn parse_status(raw: Option<&str>) -> AppResult<Option<TableStatus>> {
    raw.map(|s| {
        s.parse::<TableStatus>()
            .map_err(|e| AppError::with_message(ErrorCode::InvalidTableStatus, e))
    })
    .transpose()
}

fn validate_table_number(number: i64) -> AppResult<()> {
    if number < 1 {
        return Err(AppError::validation("table_number must be at least 1"));
    }
    Ok(())
}

fn validate_capacity(capacity: i64) -> AppResult<()> {
    if capacity < 1 {
        return Err(AppError::validation("capacity must be at least 1"));
    }
    Ok(())
}

/// The UNIQUE constraint catches races the pre-check misses
fn number_conflict(err: RepoError, number: i64) -> AppError {
    match err {
        RepoError::Duplicate(_) => AppError::with_message(
            ErrorCode::TableNumberExists,
            format!("Table number {number} already exists"),
        ),
        other => other.into(),
    }
}

fn table_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::TableNotFound, format!("Table {id} not found"))
}
