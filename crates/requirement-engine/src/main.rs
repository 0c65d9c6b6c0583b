//! 课程要求解析工具
//!
//! 读取目录和学习进度 JSON 文件，按子命令输出解析结果。

use anyhow::{Context, Result};
use clap::Parser;
use course_shared::config::AppConfig;
use course_shared::observability;
use requirement_engine::ResolverOptions;
use requirement_engine::cli::{Cli, CommandRunner};
use tracing::debug;

const SERVICE_NAME: &str = "requirement-engine";

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 配置文件缺失时使用默认值；文件存在但取值非法时直接退出
    let mut config = AppConfig::load(SERVICE_NAME).context("配置加载失败")?;

    // 命令行参数优先于配置文件
    let mut obs_config = config.observability.clone().with_service_name(SERVICE_NAME);
    if let Some(level) = &cli.log_level {
        obs_config = obs_config.with_log_level(level.clone());
    }
    observability::init(&obs_config)?;

    let mut options = ResolverOptions::from(&config.engine);
    if cli.resolve_aliases {
        options = options.with_aliases();
    }
    if cli.strict {
        options = options.strict();
    }
    debug!(?options, "解析选项");

    if let Some(path) = cli.catalog.clone() {
        config.data.catalog_path = Some(path);
    }
    if let Some(path) = cli.progress.clone() {
        config.data.progress_path = Some(path);
    }

    let runner = CommandRunner::load(
        config.data.catalog_path()?,
        config.data.progress_path.as_deref(),
        options,
    )?;
    let output = runner.run(&cli.command)?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
