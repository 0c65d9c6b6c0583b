//! 日志初始化
//!
//! EnvFilter + fmt 层，支持 pretty 与 JSON 两种输出格式。

use anyhow::Result;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use super::ObservabilityConfig;

/// 构建环境过滤器：RUST_LOG 优先，其次是配置中的级别
pub fn build_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// 初始化 tracing subscriber
///
/// 重复初始化会返回错误。
pub fn init(config: &ObservabilityConfig) -> Result<()> {
    let env_filter = build_filter(config);

    let fmt_layer = match (config.json_logs, config.log_to_stderr) {
        (true, true) => fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        (true, false) => fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .boxed(),
        (false, true) => fmt::layer()
            .with_target(true)
            .with_ansi(true)
            .with_writer(std::io::stderr)
            .boxed(),
        (false, false) => fmt::layer().with_target(true).with_ansi(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_falls_back_on_invalid_level() {
        let config = ObservabilityConfig::default().with_log_level("not a [valid] filter ===");
        // 无效的级别不应该 panic
        let _ = build_filter(&config);
    }

    #[test]
    fn test_second_init_fails() {
        let config = ObservabilityConfig::default();
        // 其他测试可能已经初始化过，第一次的结果不确定
        let _ = init(&config);

        assert!(init(&config).is_err());
    }
}
