//! 课程目录领域模型
//!
//! 课程、先修要求、徽章以及部门映射表。纯数据，不包含解析逻辑。

use crate::kinds::{CourseLevel, RequirementKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 课程定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// 缺省时由编译器填充为课程代码
    #[serde(default)]
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub subsection: Option<String>,
    #[serde(default)]
    pub level: CourseLevel,
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
    /// 引擎输出，输入中的值会被忽略
    #[serde(default)]
    pub completed: bool,
    /// 引擎输出，输入中的值会被忽略
    #[serde(default)]
    pub available: bool,
}

impl Course {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            id: code.clone(),
            code,
            name: name.into(),
            section: String::new(),
            subsection: None,
            level: CourseLevel::default(),
            prerequisites: Vec::new(),
            completed: false,
            available: false,
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    pub fn with_subsection(mut self, subsection: impl Into<String>) -> Self {
        self.subsection = Some(subsection.into());
        self
    }

    pub fn with_level(mut self, level: CourseLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_prerequisite(mut self, prerequisite: Prerequisite) -> Self {
        self.prerequisites.push(prerequisite);
        self
    }
}

/// 要求定义（先修要求与徽章要求共用）
///
/// 同一课程的多个先修要求之间是 AND 关系，需要 OR 时使用 `AlternativeGroup` 包裹。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Requirement {
    /// 单门课程
    Course {
        #[serde(default)]
        code: Option<String>,
    },
    /// 多选一
    AlternativeGroup {
        #[serde(default)]
        alternatives: Vec<Requirement>,
    },
    /// 指定级别下覆盖若干个不同部门
    DepartmentChoice {
        #[serde(default)]
        minimum: Option<u32>,
        #[serde(default)]
        level: Option<CourseLevel>,
        #[serde(default)]
        departments: Vec<String>,
    },
    /// 无法自动判定的自由文本要求
    Complex {
        #[serde(default)]
        description: String,
    },
    /// 目录中出现的未知类型
    #[serde(other)]
    Unknown,
}

/// 课程先修要求，与徽章要求结构一致
pub type Prerequisite = Requirement;

impl Requirement {
    pub fn course(code: impl Into<String>) -> Self {
        Self::Course {
            code: Some(code.into()),
        }
    }

    pub fn one_of(alternatives: Vec<Requirement>) -> Self {
        Self::AlternativeGroup { alternatives }
    }

    pub fn department_choice(
        minimum: u32,
        level: CourseLevel,
        departments: Vec<impl Into<String>>,
    ) -> Self {
        Self::DepartmentChoice {
            minimum: Some(minimum),
            level: Some(level),
            departments: departments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn complex(description: impl Into<String>) -> Self {
        Self::Complex {
            description: description.into(),
        }
    }

    pub fn kind(&self) -> RequirementKind {
        match self {
            Self::Course { .. } => RequirementKind::Course,
            Self::AlternativeGroup { .. } => RequirementKind::AlternativeGroup,
            Self::DepartmentChoice { .. } => RequirementKind::DepartmentChoice,
            Self::Complex { .. } => RequirementKind::Complex,
            Self::Unknown => RequirementKind::Unknown,
        }
    }

    /// 递归收集要求中直接引用的课程代码（包括所有备选项）
    pub fn referenced_codes(&self) -> Vec<&str> {
        let mut codes = Vec::new();
        self.collect_codes(&mut codes);
        codes
    }

    fn collect_codes<'a>(&'a self, codes: &mut Vec<&'a str>) {
        match self {
            Self::Course { code: Some(code) } => codes.push(code.as_str()),
            Self::AlternativeGroup { alternatives } => {
                for alt in alternatives {
                    alt.collect_codes(codes);
                }
            }
            _ => {}
        }
    }
}

/// 徽章（特殊规则）
///
/// 所有要求之间是 AND 关系，顶层不存在 OR。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialRule {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

impl SpecialRule {
    pub fn new(id: impl Into<String>, name: impl Into<String>, requirements: Vec<Requirement>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            branch: String::new(),
            rank: String::new(),
            requirements,
        }
    }
}

/// 徽章
pub type Badge = SpecialRule;

/// 部门映射表的一项
///
/// 映射表的顺序就是部门判定的优先级顺序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentMapping {
    pub department: String,
    /// 与分组/子分组名称做不区分大小写的子串匹配
    #[serde(default)]
    pub matches: Vec<String>,
    /// 课程代码的正则（编号段重叠时的最后判定依据）
    #[serde(default)]
    pub code_pattern: Option<String>,
}

impl DepartmentMapping {
    pub fn new(department: impl Into<String>, matches: Vec<impl Into<String>>) -> Self {
        Self {
            department: department.into(),
            matches: matches.into_iter().map(Into::into).collect(),
            code_pattern: None,
        }
    }

    pub fn with_code_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.code_pattern = Some(pattern.into());
        self
    }
}

/// 原始目录定义（解析器的输出，尚未建立索引）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDefinition {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub badges: Vec<SpecialRule>,
    #[serde(default)]
    pub departments: Vec<DepartmentMapping>,
    /// 别名代码 -> 主代码
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

fn default_version() -> String {
    "1".to_string()
}
