//! 要求类型与课程级别定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 要求类型
///
/// 与 `Requirement` 的各个变体一一对应，用于结果展示和日志字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    Course,
    AlternativeGroup,
    DepartmentChoice,
    Complex,
    Unknown,
}

impl RequirementKind {
    /// 是否为配额类要求（需要输出 progress/total）
    pub fn is_quota(&self) -> bool {
        matches!(self, Self::DepartmentChoice)
    }
}

impl fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Course => "course",
            Self::AlternativeGroup => "alternative_group",
            Self::DepartmentChoice => "department_choice",
            Self::Complex => "complex",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// 课程级别
///
/// 有序但不是严格的数值：入门 < 进阶 < 资格 < 授衔。
/// 无法识别的级别统一落到 `Unspecified`，不会导致目录加载失败。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CourseLevel {
    Introductory,
    Advanced,
    Qualification,
    Warrant,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Introductory => "introductory",
            Self::Advanced => "advanced",
            Self::Qualification => "qualification",
            Self::Warrant => "warrant",
            Self::Unspecified => "unspecified",
        };
        write!(f, "{}", s)
    }
}

/// 学习者视角的课程状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    Completed,
    InProgress,
    WaitingForGrade,
    Available,
    /// 不在任何状态集合中
    NotStarted,
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::InProgress => write!(f, "in_progress"),
            Self::WaitingForGrade => write!(f, "waiting_for_grade"),
            Self::Available => write!(f, "available"),
            Self::NotStarted => write!(f, "not_started"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(CourseLevel::Introductory < CourseLevel::Advanced);
        assert!(CourseLevel::Advanced < CourseLevel::Qualification);
        assert!(CourseLevel::Qualification < CourseLevel::Warrant);
    }

    #[test]
    fn test_unrecognized_level_falls_back() {
        let level: CourseLevel = serde_json::from_str("\"postgraduate\"").unwrap();
        assert_eq!(level, CourseLevel::Unspecified);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(RequirementKind::DepartmentChoice.to_string(), "department_choice");
        assert!(RequirementKind::DepartmentChoice.is_quota());
        assert!(!RequirementKind::Course.is_quota());
    }
}
