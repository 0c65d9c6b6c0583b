//! 引擎门面
//!
//! 持有一份编译后的目录、解析选项和观察者，把各服务的操作组合成统一入口。
//! 门面本身不可变，可以在线程间共享。

use crate::badge::{BadgeProgress, BadgeProgressService};
use crate::compiler::Catalog;
use crate::eligibility::{CatalogSummary, EligibilityResult, EligibilityService};
use crate::error::Result;
use crate::graph::GraphQuery;
use crate::models::{Course, Requirement, SpecialRule};
use crate::observer::ResolutionObserver;
use crate::progress::UserProgress;
use crate::resolver::{Evaluation, RequirementResolver, ResolverOptions, UnknownKindPolicy};
use course_shared::config::{EngineConfig, UnknownKindSetting};
use std::sync::Arc;

impl From<UnknownKindSetting> for UnknownKindPolicy {
    fn from(setting: UnknownKindSetting) -> Self {
        match setting {
            UnknownKindSetting::Satisfied => Self::Satisfied,
            UnknownKindSetting::Unsatisfied => Self::Unsatisfied,
        }
    }
}

impl From<&EngineConfig> for ResolverOptions {
    fn from(config: &EngineConfig) -> Self {
        Self {
            resolve_aliases: config.resolve_aliases,
            unknown_kind_policy: config.unknown_kind_policy.into(),
        }
    }
}

/// 要求解析引擎
#[derive(Clone)]
pub struct RequirementEngine {
    catalog: Arc<Catalog>,
    resolver: RequirementResolver,
    eligibility: EligibilityService,
    badges: BadgeProgressService,
}

impl RequirementEngine {
    pub fn new(catalog: Arc<Catalog>, options: ResolverOptions) -> Self {
        Self {
            catalog,
            resolver: RequirementResolver::new(options),
            eligibility: EligibilityService::new(options),
            badges: BadgeProgressService::new(options),
        }
    }

    /// 按配置文件中的 engine 段创建
    pub fn from_config(catalog: Arc<Catalog>, config: &EngineConfig) -> Self {
        Self::new(catalog, ResolverOptions::from(config))
    }

    pub fn with_observer(mut self, observer: Arc<dyn ResolutionObserver>) -> Self {
        self.eligibility = self.eligibility.with_observer(Arc::clone(&observer));
        self.badges = self.badges.with_observer(observer);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn options(&self) -> ResolverOptions {
        self.resolver.options()
    }

    /// 解析任意一条要求
    pub fn evaluate(&self, requirement: &Requirement, progress: &UserProgress) -> Evaluation {
        let ctx = self.resolver.context(&self.catalog, progress);
        self.resolver.evaluate(requirement, &ctx)
    }

    pub fn check_eligibility(&self, code: &str, progress: &UserProgress) -> EligibilityResult {
        self.eligibility
            .check_eligibility(&self.catalog, code, progress)
    }

    pub fn update_availability(&self, progress: &UserProgress) -> Vec<Course> {
        self.eligibility.update_availability(&self.catalog, progress)
    }

    pub fn summarize(&self, progress: &UserProgress) -> CatalogSummary {
        self.eligibility.summarize(&self.catalog, progress)
    }

    pub fn compute_badge_progress(&self, badge: &SpecialRule, progress: &UserProgress) -> BadgeProgress {
        self.badges
            .compute_badge_progress(&self.catalog, badge, progress)
    }

    /// 按 ID 计算目录中徽章的进度
    pub fn badge_progress(&self, badge_id: &str, progress: &UserProgress) -> Result<BadgeProgress> {
        self.badges.compute_by_id(&self.catalog, badge_id, progress)
    }

    pub fn all_badge_progress(&self, progress: &UserProgress) -> Vec<BadgeProgress> {
        self.badges.all_badge_progress(&self.catalog, progress)
    }

    pub fn prerequisites_for_course(&self, code: &str) -> Vec<&Course> {
        GraphQuery::new(&self.catalog).prerequisites_for_course(code)
    }

    pub fn courses_unlocked_by(&self, code: &str) -> Vec<&Course> {
        GraphQuery::new(&self.catalog).courses_unlocked_by(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::CatalogCompiler;
    use crate::models::CatalogDefinition;
    use crate::observer::MockResolutionObserver;
    use std::collections::HashMap;

    fn create_engine(options: ResolverOptions) -> RequirementEngine {
        let catalog = CatalogCompiler::new().compile(CatalogDefinition {
            courses: vec![
                Course::new("A001", "Basics"),
                Course::new("A002", "Follow-up").with_prerequisite(Requirement::course("A001")),
                Course::new("A003", "Experimental").with_prerequisite(Requirement::Unknown),
            ],
            badges: vec![SpecialRule::new(
                "starter",
                "Starter",
                vec![Requirement::course("A002")],
            )],
            aliases: HashMap::from([("OLD-A001".to_string(), "A001".to_string())]),
            ..Default::default()
        });
        RequirementEngine::new(Arc::new(catalog), options)
    }

    #[test]
    fn test_options_from_config() {
        let config = EngineConfig {
            resolve_aliases: true,
            unknown_kind_policy: UnknownKindSetting::Unsatisfied,
        };

        let options = ResolverOptions::from(&config);

        assert!(options.resolve_aliases);
        assert_eq!(options.unknown_kind_policy, UnknownKindPolicy::Unsatisfied);
        assert_eq!(
            ResolverOptions::from(&EngineConfig::default()),
            ResolverOptions::default()
        );
    }

    #[test]
    fn test_facade_delegates() {
        let engine = create_engine(ResolverOptions::default());
        let progress = UserProgress::with_completed(["A001"]);

        assert!(engine.check_eligibility("A002", &progress).eligible);
        assert_eq!(engine.update_availability(&progress).len(), 3);
        assert_eq!(engine.summarize(&progress).completed, 1);
        assert_eq!(engine.prerequisites_for_course("A002")[0].code, "A001");
        assert_eq!(engine.courses_unlocked_by("A001")[0].code, "A002");
        assert_eq!(engine.all_badge_progress(&progress).len(), 1);
        assert!(!engine.badge_progress("starter", &progress).unwrap().earned);
    }

    #[test]
    fn test_alias_option_flows_through() {
        let plain = create_engine(ResolverOptions::default());
        let aliased = create_engine(ResolverOptions::default().with_aliases());
        let progress = UserProgress::with_completed(["OLD-A001"]);

        assert!(!plain.check_eligibility("A002", &progress).eligible);
        assert!(aliased.check_eligibility("A002", &progress).eligible);
    }

    #[test]
    fn test_strict_engine_from_config() {
        let catalog = create_engine(ResolverOptions::default()).catalog.clone();
        let config = EngineConfig {
            unknown_kind_policy: UnknownKindSetting::Unsatisfied,
            ..Default::default()
        };
        let engine = RequirementEngine::from_config(catalog, &config);

        assert!(!engine.check_eligibility("A003", &UserProgress::new()).eligible);
        assert!(!engine.evaluate(&Requirement::Unknown, &UserProgress::new()).satisfied);
    }

    #[test]
    fn test_observer_shared_by_services() {
        let mut observer = MockResolutionObserver::new();
        observer
            .expect_requirement_resolved()
            .times(2)
            .return_const(());

        let engine = create_engine(ResolverOptions::default()).with_observer(Arc::new(observer));
        let progress = UserProgress::new();

        engine.check_eligibility("A002", &progress);
        engine.badge_progress("starter", &progress).unwrap();
    }
}
