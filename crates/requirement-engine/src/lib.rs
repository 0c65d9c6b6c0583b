//! 课程要求解析引擎
//!
//! 在课程目录之上回答学习者的资格问题，支持：
//! - 单门课程、多选一、部门配额、人工判定四类要求
//! - 课程资格检查与全目录可学状态推导
//! - 徽章（特殊规则）进度计算
//! - 先修关系的正向与反向查询
//! - 按版本缓存编译后的目录

pub mod alias;
pub mod badge;
pub mod cli;
pub mod compiler;
pub mod department;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod graph;
pub mod kinds;
pub mod models;
pub mod observer;
pub mod progress;
pub mod resolver;
pub mod store;

pub use alias::AliasTable;
pub use badge::{BadgeProgress, BadgeProgressService, RequirementProgress};
pub use compiler::{Catalog, CatalogCompiler};
pub use department::{DepartmentClassifier, OTHER_DEPARTMENT};
pub use eligibility::{CatalogSummary, EligibilityResult, EligibilityService, IneligibleReason};
pub use engine::RequirementEngine;
pub use error::{EngineError, Result};
pub use graph::GraphQuery;
pub use kinds::{CourseLevel, CourseStatus, RequirementKind};
pub use models::{
    Badge, CatalogDefinition, Course, DepartmentMapping, Prerequisite, Requirement, SpecialRule,
};
pub use observer::{NoopObserver, ResolutionObserver, TracingObserver};
pub use progress::{StatusChange, UserProgress};
pub use resolver::{
    Evaluation, LearnerContext, MissingInfo, QuotaProgress, RequirementResolver, ResolverOptions,
    UnknownKindPolicy,
};
pub use store::{CatalogStore, CatalogStoreStats};
