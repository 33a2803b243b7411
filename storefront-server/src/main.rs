use storefront_server::{Config, Server, setup_environment};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // 1. 设置环境 (dotenv, 日志)
    setup_environment()?;

    // 2. 加载配置
    let config = Config::from_env();
    tracing::info!(
        "Storefront server starting (env: {}, work_dir: {})",
        config.environment,
        config.work_dir
    );

    // 3. 启动 HTTP 服务器 (Server::run 会初始化状态并启动后台任务)
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
