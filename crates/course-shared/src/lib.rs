//! 共享库
//!
//! 包含课程进度工具共用的配置、错误处理、日志初始化和测试数据生成代码。

pub mod config;
pub mod data;
pub mod error;
pub mod observability;
pub mod test_utils;

pub use error::{Result, TrackerError};
