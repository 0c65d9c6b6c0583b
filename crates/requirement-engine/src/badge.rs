//! 徽章进度服务
//!
//! 徽章的所有要求之间是 AND 关系；整体进度是各要求完成情况的简单平均，不按课程数加权。

use crate::compiler::Catalog;
use crate::error::{EngineError, Result};
use crate::kinds::RequirementKind;
use crate::models::SpecialRule;
use crate::observer::{NoopObserver, ResolutionObserver};
use crate::progress::UserProgress;
use crate::resolver::{LearnerContext, RequirementResolver, ResolverOptions};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 单条要求的进度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementProgress {
    pub kind: RequirementKind,
    pub description: String,
    pub completed: bool,
    /// 配额类要求：已覆盖数量
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfied: Option<u32>,
    /// 配额类要求：最低数量
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<u32>,
    pub missing: Vec<String>,
    pub satisfied_by: Vec<String>,
}

/// 徽章进度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeProgress {
    pub badge_id: String,
    pub name: String,
    pub branch: String,
    pub rank: String,
    pub earned: bool,
    /// 没有解析出任何要求的徽章视为未配置
    pub configured: bool,
    pub requirements: Vec<RequirementProgress>,
    /// 0-100
    pub overall_progress: f64,
}

impl BadgeProgress {
    pub fn completed_count(&self) -> usize {
        self.requirements.iter().filter(|r| r.completed).count()
    }
}

/// 徽章进度服务
#[derive(Clone)]
pub struct BadgeProgressService {
    resolver: RequirementResolver,
    observer: Arc<dyn ResolutionObserver>,
}

impl BadgeProgressService {
    pub fn new(options: ResolverOptions) -> Self {
        Self {
            resolver: RequirementResolver::new(options),
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ResolutionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// 计算单个徽章的进度
    pub fn compute_badge_progress(
        &self,
        catalog: &Catalog,
        badge: &SpecialRule,
        progress: &UserProgress,
    ) -> BadgeProgress {
        let ctx = self.resolver.context(catalog, progress);
        self.compute_with_context(badge, &ctx)
    }

    /// 按 ID 计算目录中徽章的进度
    pub fn compute_by_id(
        &self,
        catalog: &Catalog,
        badge_id: &str,
        progress: &UserProgress,
    ) -> Result<BadgeProgress> {
        let badge = catalog
            .badge(badge_id)
            .ok_or_else(|| EngineError::BadgeNotFound(badge_id.to_string()))?;
        Ok(self.compute_badge_progress(catalog, badge, progress))
    }

    /// 目录中所有徽章的进度（保持目录顺序）
    pub fn all_badge_progress(&self, catalog: &Catalog, progress: &UserProgress) -> Vec<BadgeProgress> {
        let ctx = self.resolver.context(catalog, progress);
        catalog
            .badges()
            .iter()
            .map(|badge| self.compute_with_context(badge, &ctx))
            .collect()
    }

    fn compute_with_context(&self, badge: &SpecialRule, ctx: &LearnerContext<'_>) -> BadgeProgress {
        let requirements: Vec<RequirementProgress> = badge
            .requirements
            .iter()
            .map(|requirement| {
                let evaluation = self.resolver.evaluate(requirement, ctx);
                let kind = requirement.kind();

                if kind == RequirementKind::Unknown {
                    self.observer.unknown_requirement(&badge.id, evaluation.satisfied);
                }
                self.observer
                    .requirement_resolved(&badge.id, kind, evaluation.satisfied);

                let detail = evaluation.detail;
                // 只有配额类要求输出计数
                let quota = detail.progress.filter(|_| kind.is_quota());
                RequirementProgress {
                    kind,
                    description: detail.description,
                    completed: evaluation.satisfied,
                    satisfied: quota.map(|q| q.progress),
                    minimum: quota.map(|q| q.total),
                    missing: detail.missing,
                    satisfied_by: detail.satisfied_by,
                }
            })
            .collect();

        let configured = !requirements.is_empty();
        let completed = requirements.iter().filter(|r| r.completed).count();
        let overall_progress = if configured {
            completed as f64 / requirements.len() as f64 * 100.0
        } else {
            0.0
        };

        BadgeProgress {
            badge_id: badge.id.clone(),
            name: badge.name.clone(),
            branch: badge.branch.clone(),
            rank: badge.rank.clone(),
            earned: configured && completed == requirements.len(),
            configured,
            requirements,
            overall_progress,
        }
    }
}

impl Default for BadgeProgressService {
    fn default() -> Self {
        Self::new(ResolverOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::CatalogCompiler;
    use crate::kinds::CourseLevel;
    use crate::models::{CatalogDefinition, Course, DepartmentMapping, Requirement};

    fn create_test_catalog() -> Catalog {
        CatalogCompiler::new().compile(CatalogDefinition {
            courses: vec![
                Course::new("X", "Prerequisite X"),
                Course::new("T-D1", "Tactical D")
                    .with_section("Tactical")
                    .with_level(CourseLevel::Advanced),
                Course::new("E-D1", "Engineering D")
                    .with_section("Engineering")
                    .with_level(CourseLevel::Advanced),
            ],
            badges: vec![
                SpecialRule::new(
                    "officer",
                    "Officer Qualification",
                    vec![
                        Requirement::course("X"),
                        Requirement::department_choice(
                            2,
                            CourseLevel::Advanced,
                            vec!["Tactical", "Engineering"],
                        ),
                    ],
                ),
                SpecialRule::new("empty", "Unparsed Badge", Vec::new()),
            ],
            departments: vec![
                DepartmentMapping::new("Tactical", vec!["Tactical"]),
                DepartmentMapping::new("Engineering", vec!["Engineering"]),
            ],
            ..Default::default()
        })
    }

    #[test]
    fn test_partial_badge_progress() {
        let catalog = create_test_catalog();
        let service = BadgeProgressService::default();
        let progress = UserProgress::with_completed(["X", "T-D1"]);

        let result = service.compute_by_id(&catalog, "officer", &progress).unwrap();

        assert!(!result.earned);
        assert!(result.configured);
        assert_eq!(result.overall_progress, 50.0);
        assert_eq!(result.completed_count(), 1);

        let quota = &result.requirements[1];
        assert!(!quota.completed);
        assert_eq!(quota.satisfied, Some(1));
        assert_eq!(quota.minimum, Some(2));
    }

    #[test]
    fn test_only_quota_requirements_report_counts() {
        let catalog = create_test_catalog();
        let service = BadgeProgressService::default();
        let progress = UserProgress::with_completed(["X"]);

        let result = service.compute_by_id(&catalog, "officer", &progress).unwrap();

        let course = &result.requirements[0];
        assert_eq!(course.kind, RequirementKind::Course);
        assert!(course.completed);
        assert_eq!(course.satisfied, None);
        assert_eq!(course.minimum, None);

        let quota = &result.requirements[1];
        assert!(quota.kind.is_quota());
        assert_eq!(quota.satisfied, Some(0));
        assert_eq!(quota.minimum, Some(2));
    }

    #[test]
    fn test_badge_earned() {
        let catalog = create_test_catalog();
        let service = BadgeProgressService::default();
        let progress = UserProgress::with_completed(["X", "T-D1", "E-D1"]);

        let result = service.compute_by_id(&catalog, "officer", &progress).unwrap();

        assert!(result.earned);
        assert_eq!(result.overall_progress, 100.0);
        // 满足时依然返回配额明细
        assert_eq!(result.requirements[1].satisfied, Some(2));
    }

    #[test]
    fn test_badge_without_requirements_is_never_earned() {
        let catalog = create_test_catalog();
        let service = BadgeProgressService::default();
        let progress = UserProgress::with_completed(["X", "T-D1", "E-D1"]);

        let result = service.compute_by_id(&catalog, "empty", &progress).unwrap();

        assert!(!result.earned);
        assert!(!result.configured);
        assert_eq!(result.overall_progress, 0.0);
    }

    #[test]
    fn test_unknown_badge_id() {
        let catalog = create_test_catalog();
        let service = BadgeProgressService::default();

        let result = service.compute_by_id(&catalog, "missing", &UserProgress::new());
        assert!(matches!(result, Err(EngineError::BadgeNotFound(_))));
    }

    #[test]
    fn test_all_badge_progress_keeps_catalog_order() {
        let catalog = create_test_catalog();
        let service = BadgeProgressService::default();

        let all = service.all_badge_progress(&catalog, &UserProgress::new());
        let ids: Vec<_> = all.iter().map(|b| b.badge_id.as_str()).collect();

        assert_eq!(ids, vec!["officer", "empty"]);
    }

    #[test]
    fn test_badge_with_complex_requirement_never_earned() {
        let catalog = create_test_catalog();
        let service = BadgeProgressService::default();
        let badge = SpecialRule::new(
            "board",
            "Board Review",
            vec![Requirement::course("X"), Requirement::complex("Pass the review board")],
        );

        let result =
            service.compute_badge_progress(&catalog, &badge, &UserProgress::with_completed(["X"]));

        assert!(!result.earned);
        assert_eq!(result.overall_progress, 50.0);
        assert_eq!(result.requirements[1].description, "Pass the review board");
    }
}
