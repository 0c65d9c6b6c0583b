//! CLI 模块
//!
//! 基于 JSON 文件的命令行接口：
//!
//! - `eligibility` - 检查单门课程的资格
//! - `availability` - 重新推导整个目录的可学状态
//! - `badges` - 计算徽章进度
//! - `prerequisites` - 列出课程的先修课程
//! - `unlocks` - 列出完成某门课程后可能解锁的课程
//! - `summary` - 目录整体进度统计
//!
//! # 使用示例
//!
//! ```bash
//! requirement-engine --catalog catalog.json --progress progress.json eligibility A002
//! requirement-engine --catalog catalog.json badges --badge-id command
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands};
pub use runner::CommandRunner;
