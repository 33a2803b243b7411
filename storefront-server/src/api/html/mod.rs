//! HTML 页面路由
//!
//! 页面按 (所有者, 页面名) 唯一; 路径中的用户名必须是当前登录用户。
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/html/save/{username}/{page} | PUT | 保存页面 (原始请求体) | 需要 |
//! | /api/html/get/{username}/{page} | GET | 获取页面 | 需要 |
//! | /api/html/list | GET | 我的页面列表 (不含内容) | 需要 |
//! | /api/html/delete/{username}/{page} | DELETE | 删除页面 | 需要 |
//! | /api/html/render/{username}/{page} | GET | 渲染页面 (text/html) | 无 |

mod handler;

use axum::{
    Router,
    routing::{delete, get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/html", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/save/{username}/{page}", put(handler::save))
        .route("/get/{username}/{page}", get(handler::get_page))
        .route("/list", get(handler::list))
        .route("/delete/{username}/{page}", delete(handler::delete))
        .route("/render/{username}/{page}", get(handler::render))
}
