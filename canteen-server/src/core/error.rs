use thiserror::Error;

/// 服务器生命周期错误
///
/// HTTP 边界的错误使用 [`crate::utils::AppError`]，
/// 这里只覆盖启动和关闭阶段的失败。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

/// 生命周期代码的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
