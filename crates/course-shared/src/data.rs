//! 数据文件加载
//!
//! 目录和进度快照都以 JSON 文件交付，这里只负责读取和反序列化。

use crate::error::{Result, TrackerError};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

/// 读取并反序列化 JSON 文件
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| TrackerError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = content.len(), "数据文件已读取");
    Ok(serde_json::from_str(&content)?)
}

/// 读取文件原文（交给调用方自行解析）
pub fn read_text_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| TrackerError::Io {
        path: path.to_path_buf(),
        source,
    })
}
