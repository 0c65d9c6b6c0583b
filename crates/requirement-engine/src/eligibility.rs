//! 课程资格服务
//!
//! 逐条解析课程的先修要求得到资格结论，并对整个目录重新推导 completed/available 标志。
//! 每次调用都是完整、无状态的重新计算，不做缓存。

use crate::compiler::Catalog;
use crate::kinds::{CourseStatus, RequirementKind};
use crate::models::Course;
use crate::observer::{NoopObserver, ResolutionObserver};
use crate::progress::UserProgress;
use crate::resolver::{LearnerContext, MissingInfo, RequirementResolver, ResolverOptions};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 不具备资格的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibleReason {
    /// 课程代码不在目录中
    NotFound,
    /// 存在未满足的先修要求
    MissingPrerequisites,
}

/// 资格检查结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub code: String,
    pub found: bool,
    pub eligible: bool,
    /// 顺序与目录中的声明顺序一致
    pub missing_prerequisites: Vec<MissingInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<IneligibleReason>,
}

impl EligibilityResult {
    fn not_found(code: &str) -> Self {
        Self {
            code: code.to_string(),
            found: false,
            eligible: false,
            missing_prerequisites: Vec::new(),
            reason: Some(IneligibleReason::NotFound),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.reason == Some(IneligibleReason::NotFound)
    }
}

/// 目录整体进度统计
///
/// 每门课程只计入一个类别，优先级：已完成 > 学习中 > 等待成绩 > 可学 > 未解锁。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub waiting_for_grade: usize,
    pub available: usize,
    pub locked: usize,
}

impl CatalogSummary {
    /// 完成百分比
    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

/// 课程资格服务
#[derive(Clone)]
pub struct EligibilityService {
    resolver: RequirementResolver,
    observer: Arc<dyn ResolutionObserver>,
}

impl EligibilityService {
    pub fn new(options: ResolverOptions) -> Self {
        Self {
            resolver: RequirementResolver::new(options),
            observer: Arc::new(NoopObserver),
        }
    }

    /// 注入观察者
    pub fn with_observer(mut self, observer: Arc<dyn ResolutionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// 检查单门课程的资格
    ///
    /// 课程不存在时返回 `found = false` 的结果，而不是错误。
    pub fn check_eligibility(
        &self,
        catalog: &Catalog,
        code: &str,
        progress: &UserProgress,
    ) -> EligibilityResult {
        let Some(course) = catalog.course(code) else {
            self.observer.course_not_found(code);
            return EligibilityResult::not_found(code);
        };

        let ctx = self.resolver.context(catalog, progress);
        let missing = self.missing_prerequisites(course, &ctx);
        let eligible = missing.is_empty();

        EligibilityResult {
            code: course.code.clone(),
            found: true,
            eligible,
            missing_prerequisites: missing,
            reason: (!eligible).then_some(IneligibleReason::MissingPrerequisites),
        }
    }

    /// 重新推导整个目录的 completed/available 标志
    ///
    /// 返回目录课程的副本，顺序与目录一致；输入的目录和快照都不会被修改。
    pub fn update_availability(&self, catalog: &Catalog, progress: &UserProgress) -> Vec<Course> {
        let ctx = self.resolver.context(catalog, progress);

        catalog
            .courses()
            .iter()
            .map(|course| {
                let completed = ctx.is_completed(&course.code);
                let available = !completed && self.missing_prerequisites(course, &ctx).is_empty();

                let mut refreshed = course.clone();
                refreshed.completed = completed;
                refreshed.available = available;
                refreshed
            })
            .collect()
    }

    /// 目录整体进度统计
    pub fn summarize(&self, catalog: &Catalog, progress: &UserProgress) -> CatalogSummary {
        let mut summary = CatalogSummary {
            total: catalog.len(),
            ..Default::default()
        };

        for course in self.update_availability(catalog, progress) {
            if course.completed {
                summary.completed += 1;
                continue;
            }
            match progress.status_of(&course.code) {
                CourseStatus::InProgress => summary.in_progress += 1,
                CourseStatus::WaitingForGrade => summary.waiting_for_grade += 1,
                _ if course.available => summary.available += 1,
                _ => summary.locked += 1,
            }
        }

        summary
    }

    /// 逐条解析先修要求，收集所有缺失信息（保持声明顺序）
    fn missing_prerequisites(&self, course: &Course, ctx: &LearnerContext<'_>) -> Vec<MissingInfo> {
        course
            .prerequisites
            .iter()
            .filter_map(|prerequisite| {
                let evaluation = self.resolver.evaluate(prerequisite, ctx);

                if prerequisite.kind() == RequirementKind::Unknown {
                    self.observer
                        .unknown_requirement(&course.code, evaluation.satisfied);
                }
                self.observer
                    .requirement_resolved(&course.code, prerequisite.kind(), evaluation.satisfied);

                (!evaluation.satisfied).then_some(evaluation.detail)
            })
            .collect()
    }
}

impl Default for EligibilityService {
    fn default() -> Self {
        Self::new(ResolverOptions::default())
    }
}
