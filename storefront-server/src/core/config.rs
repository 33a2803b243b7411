use std::path::PathBuf;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、上传文件) |
/// | DATABASE_URL | sqlite:<WORK_DIR>/storefront.db | 数据库位置 |
/// | HTTP_PORT | 8080 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | SESSION_TTL_SECS | 3600 | 会话有效期 (秒) |
/// | SESSION_COOKIE_SECURE | production 时为 true | Cookie `Secure` 属性 |
/// | CHAT_API_URL | https://api.openai.com/v1/chat/completions | 对话补全接口 |
/// | CHAT_MODEL | gpt-4o | 模型名称 |
/// | CHAT_MAX_TOKENS | 8000 | 最大补全 token 数 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 日志目录, 存在时按天滚动写文件 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/storefront HTTP_PORT=3000 cargo run -p storefront-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存放数据库与上传的图片
    pub work_dir: String,
    /// SQLite 连接串
    pub database_url: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 会话有效期 (秒)
    pub session_ttl_secs: i64,
    /// 会话 Cookie 是否带 `Secure`
    pub session_cookie_secure: bool,
    /// 对话补全服务地址
    pub chat_api_url: String,
    /// 对话补全模型
    pub chat_model: String,
    /// 对话补全最大 token 数
    pub chat_max_tokens: u32,
    /// 日志级别
    pub log_level: String,
    /// 日志目录
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| format!("sqlite:{work_dir}/storefront.db"));
        let session_cookie_secure = std::env::var("SESSION_COOKIE_SECURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(environment == "production");

        Self {
            database_url,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            session_ttl_secs: std::env::var("SESSION_TTL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3600),
            session_cookie_secure,
            chat_api_url: std::env::var("CHAT_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".into()),
            chat_model: std::env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4o".into()),
            chat_max_tokens: std::env::var("CHAT_MAX_TOKENS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            work_dir,
            environment,
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景; 数据库路径跟随新的工作目录
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_url = format!("sqlite:{}/storefront.db", config.work_dir);
        config.http_port = http_port;
        config
    }

    /// 上传图片目录
    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads")
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
