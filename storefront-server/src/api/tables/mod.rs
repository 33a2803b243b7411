//! 桌台路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/tables | POST | 创建桌台 |
//! | /api/tables | GET | 桌台列表 (按桌号) |
//! | /api/tables/{id} | GET | 桌台详情 |
//! | /api/tables/{id} | PATCH | 部分更新 |
//! | /api/tables/{id} | DELETE | 停用 (逻辑删除) |
//! | /api/tables/{id}/orders | GET | 桌台订单 |
//!
//! 所有路由均需登录; 桌号全局唯一 (含已停用桌台)。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/orders", get(handler::list_orders))
}
