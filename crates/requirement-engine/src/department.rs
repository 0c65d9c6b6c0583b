//! 部门判定器
//!
//! 根据目录提供的部门映射表，将课程归到唯一的规范部门。
//! 映射表的顺序就是优先级顺序，所有调用方共用这一个实现。

use crate::models::{Course, DepartmentMapping};
use regex::Regex;
use tracing::warn;

/// 无法归类时返回的部门名
pub const OTHER_DEPARTMENT: &str = "Other";

/// 预处理后的映射项
#[derive(Debug, Clone)]
struct DepartmentEntry {
    name: String,
    name_lower: String,
    matches_lower: Vec<String>,
    code_pattern: Option<Regex>,
}

/// 部门判定器
#[derive(Debug, Clone, Default)]
pub struct DepartmentClassifier {
    entries: Vec<DepartmentEntry>,
}

impl DepartmentClassifier {
    /// 从映射表构建
    ///
    /// 无效的代码正则只记录警告并忽略，不影响其余匹配规则。
    pub fn new(mappings: &[DepartmentMapping]) -> Self {
        let entries = mappings
            .iter()
            .map(|mapping| {
                let code_pattern = mapping.code_pattern.as_deref().and_then(|pattern| {
                    Regex::new(pattern)
                        .map_err(|e| {
                            warn!(
                                department = %mapping.department,
                                pattern = %pattern,
                                error = %e,
                                "部门代码正则无效，已忽略"
                            );
                        })
                        .ok()
                });

                DepartmentEntry {
                    name: mapping.department.clone(),
                    name_lower: mapping.department.to_lowercase(),
                    matches_lower: mapping
                        .matches
                        .iter()
                        .filter(|m| !m.trim().is_empty())
                        .map(|m| m.to_lowercase())
                        .collect(),
                    code_pattern,
                }
            })
            .collect();

        Self { entries }
    }

    /// 判定课程所属部门
    ///
    /// 判定顺序：
    /// 1. 子分组名称（更具体）
    /// 2. 分组名称
    /// 3. 分组名称中直接出现的部门名
    /// 4. 课程代码正则
    ///
    /// 每一步都按映射表顺序检查，第一个命中即返回；全部未命中返回 `"Other"`。
    pub fn classify(&self, course: &Course) -> &str {
        if let Some(subsection) = course.subsection.as_deref() {
            if let Some(name) = self.match_candidates(subsection) {
                return name;
            }
        }

        if let Some(name) = self.match_candidates(&course.section) {
            return name;
        }

        let section_lower = course.section.to_lowercase();
        if !section_lower.is_empty() {
            if let Some(entry) = self
                .entries
                .iter()
                .find(|e| !e.name_lower.is_empty() && section_lower.contains(&e.name_lower))
            {
                return &entry.name;
            }
        }

        if let Some(entry) = self.entries.iter().find(|e| {
            e.code_pattern
                .as_ref()
                .is_some_and(|re| re.is_match(&course.code))
        }) {
            return &entry.name;
        }

        OTHER_DEPARTMENT
    }

    /// 课程是否属于指定部门
    pub fn matches_department(&self, course: &Course, target: &str) -> bool {
        self.classify(course) == target
    }

    fn match_candidates(&self, text: &str) -> Option<&str> {
        let text = text.to_lowercase();
        if text.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|e| e.matches_lower.iter().any(|m| text.contains(m.as_str())))
            .map(|e| e.name.as_str())
    }
}
