//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构。

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 课程要求解析工具
///
/// 所有结果以 JSON 输出到 stdout，日志输出到 stderr。
#[derive(Parser, Debug)]
#[command(name = "requirement-engine")]
#[command(version, about = "课程要求解析工具")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 课程目录 JSON 文件（缺省时读取配置 data.catalog_path）
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// 学习进度 JSON 文件（缺省时读取配置 data.progress_path，都没有则视为空进度）
    #[arg(long, global = true)]
    pub progress: Option<PathBuf>,

    /// 比较课程代码前做别名归一化
    #[arg(long, global = true)]
    pub resolve_aliases: bool,

    /// 未知类型的要求按未满足处理
    #[arg(long, global = true)]
    pub strict: bool,

    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// 子命令枚举
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// 检查单门课程的资格
    Eligibility {
        /// 课程代码
        code: String,
    },

    /// 重新推导整个目录的 completed/available 标志
    Availability,

    /// 计算徽章进度
    ///
    /// 不指定徽章时输出目录中全部徽章。
    Badges {
        /// 徽章 ID
        #[arg(short, long)]
        badge_id: Option<String>,
    },

    /// 列出课程的全部先修课程
    Prerequisites {
        /// 课程代码
        code: String,
    },

    /// 列出引用了该课程作为先修的课程
    Unlocks {
        /// 课程代码
        code: String,
    },

    /// 目录整体进度统计
    Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_eligibility() {
        let cli = Cli::parse_from([
            "requirement-engine",
            "--catalog",
            "catalog.json",
            "eligibility",
            "A002",
        ]);

        assert_eq!(cli.catalog, Some(PathBuf::from("catalog.json")));
        assert!(cli.progress.is_none());
        assert!(!cli.strict);
        assert_eq!(
            cli.command,
            Commands::Eligibility {
                code: "A002".to_string()
            }
        );
    }

    #[test]
    fn test_cli_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "requirement-engine",
            "badges",
            "--badge-id",
            "command",
            "--strict",
            "--resolve-aliases",
            "--progress",
            "progress.json",
        ]);

        assert!(cli.strict);
        assert!(cli.resolve_aliases);
        assert_eq!(cli.progress, Some(PathBuf::from("progress.json")));
        match cli.command {
            Commands::Badges { badge_id } => assert_eq!(badge_id.as_deref(), Some("command")),
            _ => panic!("预期 Badges 命令"),
        }
    }

    #[test]
    fn test_cli_parse_simple_commands() {
        let cli = Cli::parse_from(["requirement-engine", "summary"]);
        assert_eq!(cli.command, Commands::Summary);

        let cli = Cli::parse_from(["requirement-engine", "unlocks", "A001", "-l", "debug"]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(
            cli.command,
            Commands::Unlocks {
                code: "A001".to_string()
            }
        );
    }

    #[test]
    fn test_cli_missing_code_is_error() {
        assert!(Cli::try_parse_from(["requirement-engine", "eligibility"]).is_err());
    }
}
