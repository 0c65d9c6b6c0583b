//! 统一可观测性模块
//!
//! 所有二进制程序通过单一入口点初始化日志。库代码只使用 `tracing` 宏，从不安装 subscriber。

pub mod tracing;

use ::tracing::info;
use anyhow::Result;
use serde::Deserialize;

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// 服务名称，用于标识日志来源
    pub service_name: String,

    /// 日志级别（如 "info", "debug"），RUST_LOG 优先
    pub log_level: String,

    /// 是否启用 JSON 格式日志
    pub json_logs: bool,

    /// 日志写入 stderr，stdout 留给命令输出
    pub log_to_stderr: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown-service".to_string(),
            log_level: default_log_level(),
            json_logs: false,
            log_to_stderr: true,
        }
    }
}

impl ObservabilityConfig {
    /// 注入服务名
    pub fn with_service_name(mut self, service_name: &str) -> Self {
        self.service_name = service_name.to_string();
        self
    }

    pub fn with_log_level(mut self, log_level: impl Into<String>) -> Self {
        self.log_level = log_level.into();
        self
    }
}

/// 统一初始化可观测性
///
/// # Example
///
/// ```ignore
/// use course_shared::observability::{init, ObservabilityConfig};
///
/// fn main() -> anyhow::Result<()> {
///     let config = ObservabilityConfig::default().with_service_name("requirement-engine");
///     init(&config)?;
///     Ok(())
/// }
/// ```
pub fn init(config: &ObservabilityConfig) -> Result<()> {
    tracing::init(config)?;

    info!(
        service = %config.service_name,
        level = %config.log_level,
        json = config.json_logs,
        "Observability initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
        assert!(config.log_to_stderr);
    }

    #[test]
    fn test_builders() {
        let config = ObservabilityConfig::default()
            .with_service_name("requirement-engine")
            .with_log_level("debug");

        assert_eq!(config.service_name, "requirement-engine");
        assert_eq!(config.log_level, "debug");
    }
}
