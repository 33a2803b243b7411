//! 认证模块
//!
//! - [`SessionContext`] - 会话提取器 (登录身份 + 购物车关联 ID)
//! - [`password`] - Argon2 密码哈希
//! - [`ownership`] - 统一的归属校验

pub mod ownership;
pub mod password;
pub mod session;

pub use ownership::assert_owner;
pub use session::{Identity, SESSION_COOKIE, SessionContext, SetSessionCookie};
