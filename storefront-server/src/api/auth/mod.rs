//! 认证路由
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/register | POST | 注册 | 无 |
//! | /api/login | POST | 登录, 下发会话 Cookie | 无 |
//! | /api/logout | GET | 登出, 清除会话 | 无 |
//! | /api/dashboard | GET | 当前登录用户 | 需要 |
//! | /api/users | GET | 用户列表 | 需要 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/register", post(handler::register))
        .route("/api/login", post(handler::login))
        .route("/api/logout", get(handler::logout))
        .route("/api/dashboard", get(handler::dashboard))
        .route("/api/users", get(handler::list_users))
}
