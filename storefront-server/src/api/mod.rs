//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册、登录、登出、用户信息
//! - [`products`] - 商品管理与图片上传
//! - [`cart`] - 购物车与结账
//! - [`orders`] - 订单管理
//! - [`tables`] - 桌台管理
//! - [`html`] - HTML 页面存储
//! - [`settings`] - 用户设置与对话补全代理

pub mod auth;
pub mod cart;
pub mod health;
pub mod html;
pub mod orders;
pub mod products;
pub mod settings;
pub mod tables;

use serde::Serialize;

pub use crate::utils::AppResult;

/// Plain acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
