use thiserror::Error;

use crate::utils::AppError;

/// 服务器启动/运行错误
///
/// 请求级错误走 [`AppError`]; 这里只覆盖进程生命周期。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("初始化失败: {0}")]
    Init(#[from] AppError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 服务器生命周期的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
