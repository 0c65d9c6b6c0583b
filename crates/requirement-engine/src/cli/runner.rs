//! 命令执行器
//!
//! 加载目录与进度文件，把子命令转化为引擎调用，结果统一序列化为 JSON。

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use course_shared::data::{read_json_file, read_text_file};

use crate::cli::Commands;
use crate::engine::RequirementEngine;
use crate::models::Course;
use crate::observer::TracingObserver;
use crate::progress::UserProgress;
use crate::resolver::ResolverOptions;
use crate::store::CatalogStore;

/// 图查询输出的课程摘要
#[derive(Debug, Serialize)]
struct CourseRef<'a> {
    code: &'a str,
    name: &'a str,
    section: &'a str,
}

impl<'a> From<&'a Course> for CourseRef<'a> {
    fn from(course: &'a Course) -> Self {
        Self {
            code: &course.code,
            name: &course.name,
            section: &course.section,
        }
    }
}

/// 命令执行器
pub struct CommandRunner {
    engine: RequirementEngine,
    progress: UserProgress,
}

impl CommandRunner {
    pub fn new(engine: RequirementEngine, progress: UserProgress) -> Self {
        Self { engine, progress }
    }

    /// 从文件加载目录和进度
    pub fn load(
        catalog_path: &Path,
        progress_path: Option<&Path>,
        options: ResolverOptions,
    ) -> Result<Self> {
        let store = CatalogStore::new();
        let json = read_text_file(catalog_path)?;
        let version = store
            .load_from_json(&json)
            .with_context(|| format!("无法解析目录文件 {}", catalog_path.display()))?;
        let catalog = store.require(&version)?;

        let progress = match progress_path {
            Some(path) => read_json_file::<UserProgress>(path)?,
            None => {
                info!("未指定进度文件，使用空进度");
                UserProgress::new()
            }
        };

        let overlapping = progress.overlapping_codes();
        if !overlapping.is_empty() {
            warn!(codes = ?overlapping, "进度快照中存在同时属于多个状态的课程");
        }

        info!(
            version = %version,
            courses = catalog.len(),
            badges = catalog.badges().len(),
            completed = progress.completed.len(),
            "目录与进度已加载"
        );

        let engine = RequirementEngine::new(catalog, options).with_observer(Arc::new(TracingObserver));
        Ok(Self::new(engine, progress))
    }

    pub fn engine(&self) -> &RequirementEngine {
        &self.engine
    }

    /// 执行子命令，返回 JSON 结果
    pub fn run(&self, command: &Commands) -> Result<Value> {
        let value = match command {
            Commands::Eligibility { code } => {
                serde_json::to_value(self.engine.check_eligibility(code, &self.progress))?
            }
            Commands::Availability => {
                serde_json::to_value(self.engine.update_availability(&self.progress))?
            }
            Commands::Badges { badge_id: Some(id) } => {
                serde_json::to_value(self.engine.badge_progress(id, &self.progress)?)?
            }
            Commands::Badges { badge_id: None } => {
                serde_json::to_value(self.engine.all_badge_progress(&self.progress))?
            }
            Commands::Prerequisites { code } => {
                let courses = self.engine.prerequisites_for_course(code);
                Self::course_list(code, &courses)
            }
            Commands::Unlocks { code } => {
                let courses = self.engine.courses_unlocked_by(code);
                Self::course_list(code, &courses)
            }
            Commands::Summary => {
                let summary = self.engine.summarize(&self.progress);
                let mut value = serde_json::to_value(summary)?;
                value["completion_rate"] = json!(summary.completion_rate());
                value
            }
        };

        Ok(value)
    }

    fn course_list(code: &str, courses: &[&Course]) -> Value {
        let refs: Vec<CourseRef<'_>> = courses.iter().map(|&c| CourseRef::from(c)).collect();
        json!({ "code": code, "courses": refs })
    }
}
