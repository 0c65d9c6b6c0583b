//! 引擎错误类型
//!
//! 解析本身不会因为数据形态出错；错误只出现在目录加载和存储层。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("目录解析失败: {0}")]
    CatalogParse(#[from] serde_json::Error),

    #[error("目录版本未找到: {0}")]
    CatalogNotFound(String),

    #[error("徽章未找到: {0}")]
    BadgeNotFound(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
