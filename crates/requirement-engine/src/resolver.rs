//! 要求解析器
//!
//! 针对单个学习者状态判定单条要求是否满足，并给出缺失信息。
//! 每种要求类型对应一个分支，数据缺失时按固定的降级策略处理，不会返回错误。

use crate::compiler::Catalog;
use crate::kinds::{CourseLevel, RequirementKind};
use crate::models::{Course, Requirement};
use crate::progress::UserProgress;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 未知要求类型的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKindPolicy {
    /// 视为已满足（兼容目录格式演进）
    #[default]
    Satisfied,
    /// 视为未满足（严格模式）
    Unsatisfied,
}

/// 解析选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolverOptions {
    /// 比较前是否对要求代码和已完成代码做别名规范化
    #[serde(default)]
    pub resolve_aliases: bool,
    #[serde(default)]
    pub unknown_kind_policy: UnknownKindPolicy,
}

impl ResolverOptions {
    pub fn with_aliases(mut self) -> Self {
        self.resolve_aliases = true;
        self
    }

    pub fn strict(mut self) -> Self {
        self.unknown_kind_policy = UnknownKindPolicy::Unsatisfied;
        self
    }
}

/// 配额进度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaProgress {
    pub progress: u32,
    pub total: u32,
}

impl QuotaProgress {
    /// 还差多少
    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.progress)
    }
}

/// 缺失信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingInfo {
    pub kind: RequirementKind,
    pub description: String,
    /// 尚未满足的标识（课程代码或部门名）
    pub missing: Vec<String>,
    /// 已满足的标识
    pub satisfied_by: Vec<String>,
    /// 仅配额类要求有值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<QuotaProgress>,
}

impl MissingInfo {
    fn empty(kind: RequirementKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            missing: Vec::new(),
            satisfied_by: Vec::new(),
            progress: None,
        }
    }
}

/// 单条要求的完整评估结果
///
/// 与 `resolve` 不同，满足时也保留明细（配额进度等）。
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub satisfied: bool,
    pub detail: MissingInfo,
}

/// 一次调用内的学习者上下文
///
/// 预先计算已完成集合（可选别名规范化）和已完成的目录课程，调用期间只读。
pub struct LearnerContext<'a> {
    catalog: &'a Catalog,
    progress: &'a UserProgress,
    resolve_aliases: bool,
    completed: HashSet<&'a str>,
    completed_courses: Vec<&'a Course>,
}

impl<'a> LearnerContext<'a> {
    pub fn new(catalog: &'a Catalog, progress: &'a UserProgress, options: ResolverOptions) -> Self {
        let aliases = catalog.aliases();
        let resolve_aliases = options.resolve_aliases;

        let completed: HashSet<&'a str> = progress
            .completed
            .iter()
            .map(|code| {
                if resolve_aliases {
                    aliases.canonical(code.as_str())
                } else {
                    code.as_str()
                }
            })
            .collect();

        let mut seen: HashSet<&'a str> = HashSet::new();
        let mut completed_courses: Vec<&'a Course> = progress
            .completed
            .iter()
            .filter_map(|code| {
                if resolve_aliases {
                    catalog.course_with_alias(code)
                } else {
                    catalog.course(code)
                }
            })
            .filter(|&course| seen.insert(course.code.as_str()))
            .collect();
        // HashSet 迭代顺序不稳定，排序保证结果可复现
        completed_courses.sort_by(|a, b| a.code.cmp(&b.code));

        Self {
            catalog,
            progress,
            resolve_aliases,
            completed,
            completed_courses,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn progress(&self) -> &'a UserProgress {
        self.progress
    }

    /// 课程是否已完成
    pub fn is_completed(&self, code: &str) -> bool {
        if self.resolve_aliases {
            self.completed.contains(self.catalog.aliases().canonical(code))
        } else {
            self.completed.contains(code)
        }
    }

    /// 已完成的目录课程（按代码排序）
    pub fn completed_courses(&self) -> &[&'a Course] {
        &self.completed_courses
    }
}

/// 要求解析器
#[derive(Debug, Clone, Copy, Default)]
pub struct RequirementResolver {
    options: ResolverOptions,
}

impl RequirementResolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    /// 构建本次调用的学习者上下文
    pub fn context<'a>(&self, catalog: &'a Catalog, progress: &'a UserProgress) -> LearnerContext<'a> {
        LearnerContext::new(catalog, progress, self.options)
    }

    /// 解析要求：满足返回 None，否则返回缺失信息
    pub fn resolve(&self, requirement: &Requirement, ctx: &LearnerContext<'_>) -> Option<MissingInfo> {
        let evaluation = self.evaluate(requirement, ctx);
        if evaluation.satisfied {
            None
        } else {
            Some(evaluation.detail)
        }
    }

    /// 评估要求，满足与否都返回明细
    pub fn evaluate(&self, requirement: &Requirement, ctx: &LearnerContext<'_>) -> Evaluation {
        match requirement {
            Requirement::Course { code } => self.evaluate_course(code.as_deref(), ctx),
            Requirement::AlternativeGroup { alternatives } => {
                self.evaluate_alternatives(alternatives, ctx)
            }
            Requirement::DepartmentChoice {
                minimum,
                level,
                departments,
            } => self.evaluate_department_choice(*minimum, *level, departments, ctx),
            Requirement::Complex { description } => Evaluation {
                satisfied: false,
                detail: MissingInfo::empty(RequirementKind::Complex, description.clone()),
            },
            Requirement::Unknown => Evaluation {
                satisfied: self.options.unknown_kind_policy == UnknownKindPolicy::Satisfied,
                detail: MissingInfo::empty(RequirementKind::Unknown, "Unrecognized requirement type"),
            },
        }
    }

    /// 单门课程；没有代码时视为满足
    fn evaluate_course(&self, code: Option<&str>, ctx: &LearnerContext<'_>) -> Evaluation {
        let Some(code) = code else {
            return Evaluation {
                satisfied: true,
                detail: MissingInfo::empty(RequirementKind::Course, "Course requirement without a code"),
            };
        };

        let satisfied = ctx.is_completed(code);
        let description = match ctx.catalog().course(code) {
            Some(course) => format!("Complete {} ({})", code, course.name),
            None => format!("Complete {}", code),
        };

        let mut detail = MissingInfo::empty(RequirementKind::Course, description);
        if satisfied {
            detail.satisfied_by.push(code.to_string());
        } else {
            detail.missing.push(code.to_string());
        }

        Evaluation { satisfied, detail }
    }

    /// 多选一；空列表永远不满足
    fn evaluate_alternatives(
        &self,
        alternatives: &[Requirement],
        ctx: &LearnerContext<'_>,
    ) -> Evaluation {
        if alternatives.is_empty() {
            return Evaluation {
                satisfied: false,
                detail: MissingInfo::empty(
                    RequirementKind::AlternativeGroup,
                    "Alternative group has no options",
                ),
            };
        }

        let mut satisfied = false;
        let mut parts = Vec::with_capacity(alternatives.len());
        let mut detail = MissingInfo::empty(RequirementKind::AlternativeGroup, String::new());

        // 不短路：即使已有一项满足，也收集全部明细用于展示
        for alternative in alternatives {
            let nested = self.evaluate(alternative, ctx);
            satisfied |= nested.satisfied;

            parts.push(match alternative {
                Requirement::Course { code: Some(code) } => code.clone(),
                _ => nested.detail.description.clone(),
            });
            push_unique(&mut detail.missing, nested.detail.missing);
            push_unique(&mut detail.satisfied_by, nested.detail.satisfied_by);
        }

        detail.description = format!("One of: {}", parts.join(" OR "));
        Evaluation { satisfied, detail }
    }

    /// 部门配额：指定级别的已完成课程需覆盖至少 minimum 个候选部门
    fn evaluate_department_choice(
        &self,
        minimum: Option<u32>,
        level: Option<CourseLevel>,
        departments: &[String],
        ctx: &LearnerContext<'_>,
    ) -> Evaluation {
        let (Some(minimum), Some(level)) = (minimum, level) else {
            return Evaluation {
                satisfied: false,
                detail: MissingInfo::empty(
                    RequirementKind::DepartmentChoice,
                    "Department requirement is missing its quota",
                ),
            };
        };

        let mut candidates: Vec<&str> = Vec::with_capacity(departments.len());
        for department in departments {
            if !candidates.contains(&department.as_str()) {
                candidates.push(department.as_str());
            }
        }

        let classifier = ctx.catalog().classifier();
        let covered: HashSet<&str> = ctx
            .completed_courses()
            .iter()
            .filter(|course| course.level == level)
            .map(|course| classifier.classify(course))
            .filter(|department| candidates.contains(department))
            .collect();

        let (satisfied_by, missing): (Vec<&str>, Vec<&str>) =
            candidates.iter().copied().partition(|d| covered.contains(d));

        let quota = QuotaProgress {
            progress: satisfied_by.len() as u32,
            total: minimum,
        };
        let satisfied = quota.progress >= quota.total;

        let mut description = format!(
            "Complete {} courses in at least {} of: {}",
            level,
            minimum,
            candidates.join(", ")
        );
        if !satisfied {
            description.push_str(&format!(" ({} more needed)", quota.remaining()));
        }

        Evaluation {
            satisfied,
            detail: MissingInfo {
                kind: RequirementKind::DepartmentChoice,
                description,
                missing: missing.into_iter().map(String::from).collect(),
                satisfied_by: satisfied_by.into_iter().map(String::from).collect(),
                progress: Some(quota),
            },
        }
    }
}

fn push_unique(target: &mut Vec<String>, items: Vec<String>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}
