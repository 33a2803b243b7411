//! 购物车路由
//!
//! 购物车按会话中的 cart id 隔离, 无需登录; 首次访问时生成 cart id 并下发 Cookie。
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/cart | POST | 加入购物车 (同商品合并数量) |
//! | /api/cart | GET | 购物车内容与合计 |
//! | /api/cart/{id} | PATCH | 修改数量 |
//! | /api/cart/{id} | DELETE | 移除一行 |
//! | /api/cart/checkout | POST | 结账 |
//! | /api/cart/clear | DELETE | 清空 |

mod handler;

use axum::{
    Router,
    routing::{delete, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::add).get(handler::list))
        .route("/checkout", post(handler::checkout))
        .route("/clear", delete(handler::clear))
        .route("/{id}", patch(handler::update).delete(handler::remove))
}
