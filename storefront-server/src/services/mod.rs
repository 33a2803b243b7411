//! 业务服务
//!
//! - [`checkout`] - 购物车结算事务 (购物车 -> 订单)
//! - [`chat`] - 对话补全接口客户端
//! - [`image_store`] - 商品图片校验与存储

pub mod chat;
pub mod checkout;
pub mod image_store;
