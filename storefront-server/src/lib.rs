//! Storefront Server - 多租户店铺后端
//!
//! # 架构概述
//!
//! - **会话** (`auth`): Cookie 会话, 登录身份与购物车 id 相互独立
//! - **数据库** (`db`): 嵌入式 SQLite (sqlx), 启动时执行迁移
//! - **结账** (`services/checkout`): 购物车 -> 订单, 单事务完成
//! - **HTTP API** (`api`): RESTful JSON 接口
//!
//! # 模块结构
//!
//! ```text
//! storefront-server/src/
//! ├── core/          # 配置、状态、服务器、后台任务
//! ├── auth/          # 会话、密码哈希、所有权校验
//! ├── services/      # 结账事务、图片存储、对话补全客户端
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 日志、输入校验
//! └── db/            # 连接池与仓储
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{Identity, SessionContext};
pub use core::{Config, Server, ServerState, build_app};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: 加载 .env, 初始化日志
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // .env 不存在时忽略
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
    Ok(())
}
