//! 订单路由
//!
//! | 路径 | 方法 | 说明 | 范围 |
//! |------|------|------|------|
//! | /api/orders | POST | 直接下单 | 自己的商品 |
//! | /api/orders | GET | 全部订单 (含游客订单) | 全局 |
//! | /api/orders/{id} | GET | 订单详情 | 仅本人 |
//! | /api/orders/{id}/status | PATCH | 修改状态 | 全局 |
//! | /api/orders/{id} | DELETE | 删除订单 | 仅本人 |
//!
//! 所有路由均需登录。

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
        .route("/{id}/status", patch(handler::update_status))
}
