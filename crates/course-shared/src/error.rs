//! 统一错误处理模块
//!
//! 文件读取、配置加载等基础设施错误。引擎本身的错误定义在各自的 crate 中。

use std::path::PathBuf;
use thiserror::Error;

/// 基础设施错误类型
#[derive(Debug, Error)]
pub enum TrackerError {
    // ==================== 文件错误 ====================
    #[error("文件读取失败: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),

    // ==================== 配置错误 ====================
    #[error("配置加载失败: {0}")]
    Config(#[from] config::ConfigError),

    #[error("无效的配置项: {field} - {message}")]
    InvalidConfig { field: String, message: String },
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidConfig { .. } => "INVALID_CONFIG",
        }
    }
}
