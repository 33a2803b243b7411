//! 后台任务
//!
//! - 过期会话清理 (每 5 分钟)

use std::time::Duration;

use shared::util::now_millis;
use sqlx::SqlitePool;
use tokio::task::JoinHandle;

use crate::db::repository::session;

/// 过期会话清理间隔
pub const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(300);

/// 启动过期会话清理任务
pub fn spawn_session_purge(pool: SqlitePool, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            match session::purge_expired(&pool, now_millis()).await {
                Ok(0) => {}
                Ok(n) => tracing::info!(removed = n, "Expired sessions purged"),
                Err(e) => tracing::warn!(error = %e, "Session purge failed"),
            }
        }
    })
}
