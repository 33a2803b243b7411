//! 用户设置与对话补全路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/openai/set-key | POST | 保存对话补全 API Key |
//! | /api/openai/get-key | GET | 查询 Key (脱敏) |
//! | /api/openai/chat | POST | 对话补全代理 |
//! | /api/user/main-menu | GET | 查询主菜单页面 |
//! | /api/user/main-menu | PUT | 设置主菜单页面 |
//!
//! 所有路由均需登录。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/openai/set-key", post(handler::set_key))
        .route("/api/openai/get-key", get(handler::get_key))
        .route("/api/openai/chat", post(handler::chat))
        .route(
            "/api/user/main-menu",
            get(handler::get_main_menu).put(handler::set_main_menu),
        )
}
