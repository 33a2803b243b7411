//! 商品路由
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/products/upload | POST | 上传商品 (multipart, 含图片) | 需要 |
//! | /api/products/mine | GET | 我的商品 | 需要 |
//! | /api/products/{id} | GET | 商品详情 | 无 |
//! | /api/products/{id} | PUT | 更新商品 (仅所有者) | 需要 |
//! | /api/products/{id} | DELETE | 删除商品 (仅所有者) | 需要 |
//! | /uploads/{filename} | GET | 商品图片 | 无 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/products", routes())
        // Serve uploaded images - public access
        .route("/uploads/{filename}", get(handler::serve_image))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/upload", post(handler::upload))
        .route("/mine", get(handler::list_mine))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
