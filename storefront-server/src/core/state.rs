//! Server State
//!
//! Everything a handler needs, passed explicitly through axum's `State`.
//! There is no process-wide singleton; tests build their own state.

use std::time::Duration;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// 服务器状态 - 所有处理器共享
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 对外 HTTP 客户端 (对话补全接口)
    pub http: reqwest::Client,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    pub fn new(config: Config, pool: SqlitePool) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { config, pool, http })
    }

    /// 初始化: 创建工作目录、打开数据库并执行迁移
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(config.uploads_dir())
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;
        let db = DbService::new(&config.database_url).await?;
        Self::new(config.clone(), db.pool)
    }
}
