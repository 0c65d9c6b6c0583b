//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use crate::error::TrackerError;
use crate::observability::ObservabilityConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 数据文件配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// 课程目录 JSON
    pub catalog_path: Option<PathBuf>,
    /// 学习进度快照 JSON
    pub progress_path: Option<PathBuf>,
}

impl DataConfig {
    /// 目录文件路径，未配置时报错
    pub fn catalog_path(&self) -> Result<&Path, TrackerError> {
        self.catalog_path
            .as_deref()
            .ok_or_else(|| TrackerError::InvalidConfig {
                field: "data.catalog_path".to_string(),
                message: "未指定目录文件，使用 --catalog 或在配置中设置".to_string(),
            })
    }
}

/// 未知要求类型的处理方式
///
/// 只接受 `satisfied` 和 `unsatisfied`，拼写错误在加载阶段报错。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKindSetting {
    #[default]
    Satisfied,
    Unsatisfied,
}

/// 解析引擎配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 比较课程代码前先做别名归一化
    pub resolve_aliases: bool,
    pub unknown_kind_policy: UnknownKindSetting,
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. config/{service_name}.toml（服务特定配置）
    /// 4. 环境变量（TRACKER_ 前缀，如 TRACKER_ENGINE__RESOLVE_ALIASES -> engine.resolve_aliases）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("TRACKER_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        Self::load_from(service_name, &env, Path::new(&config_dir))
    }

    /// 从指定目录加载配置
    pub fn load_from(service_name: &str, env: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", env))).required(false))
            .add_source(
                File::from(config_dir.join(format!("{}.toml", service_name))).required(false),
            )
            // 字段名本身含下划线，层级分隔使用双下划线
            .add_source(
                Environment::with_prefix("TRACKER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}
