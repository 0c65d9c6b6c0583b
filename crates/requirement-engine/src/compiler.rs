//! 目录编译器
//!
//! 将解析器输出的目录定义编译为带索引的只读目录：课程代码索引、部门判定器、别名表。
//! 数据问题（重复代码、无效正则、悬空引用）只记录警告，不会导致编译失败。

use crate::alias::AliasTable;
use crate::department::DepartmentClassifier;
use crate::error::Result;
use crate::models::{CatalogDefinition, Course, SpecialRule};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// 编译后的目录
#[derive(Debug, Clone)]
pub struct Catalog {
    version: String,
    courses: Vec<Course>,
    /// 课程代码 -> courses 下标
    index: HashMap<String, usize>,
    badges: Vec<SpecialRule>,
    classifier: DepartmentClassifier,
    aliases: AliasTable,
    /// 编译序号（用于缓存失效）
    pub compile_version: u64,
}

impl Catalog {
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn badges(&self) -> &[SpecialRule] {
        &self.badges
    }

    /// 按代码查找课程
    pub fn course(&self, code: &str) -> Option<&Course> {
        self.index.get(code).map(|&i| &self.courses[i])
    }

    /// 按代码查找课程，找不到时再尝试别名的主代码
    pub fn course_with_alias(&self, code: &str) -> Option<&Course> {
        self.course(code)
            .or_else(|| self.course(self.aliases.canonical(code)))
    }

    pub fn badge(&self, id: &str) -> Option<&SpecialRule> {
        self.badges.iter().find(|b| b.id == id)
    }

    pub fn classifier(&self) -> &DepartmentClassifier {
        &self.classifier
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

/// 目录编译器
pub struct CatalogCompiler {
    compile_version: u64,
}

impl CatalogCompiler {
    pub fn new() -> Self {
        Self { compile_version: 0 }
    }

    /// 从 JSON 字符串编译目录
    pub fn compile_from_json(&mut self, json: &str) -> Result<Catalog> {
        let definition: CatalogDefinition = serde_json::from_str(json)?;
        Ok(self.compile(definition))
    }

    /// 编译目录
    pub fn compile(&mut self, definition: CatalogDefinition) -> Catalog {
        let CatalogDefinition {
            version,
            courses,
            badges,
            departments,
            aliases,
        } = definition;

        let courses = Self::dedupe_courses(courses);
        let index: HashMap<String, usize> = courses
            .iter()
            .enumerate()
            .map(|(i, c)| (c.code.clone(), i))
            .collect();

        Self::report_dangling_codes(&courses, &badges, &index);

        self.compile_version += 1;

        debug!(
            version = %version,
            courses = courses.len(),
            badges = badges.len(),
            departments = departments.len(),
            compile_version = self.compile_version,
            "目录编译完成"
        );

        Catalog {
            version,
            classifier: DepartmentClassifier::new(&departments),
            aliases: AliasTable::new(&aliases),
            courses,
            index,
            badges,
            compile_version: self.compile_version,
        }
    }

    /// 重复的课程代码保留第一次出现的定义
    fn dedupe_courses(courses: Vec<Course>) -> Vec<Course> {
        let mut seen = HashSet::with_capacity(courses.len());
        let mut result = Vec::with_capacity(courses.len());

        for mut course in courses {
            if !seen.insert(course.code.clone()) {
                warn!(code = %course.code, "课程代码重复，已忽略后出现的定义");
                continue;
            }
            // 派生标志只由引擎计算
            course.completed = false;
            course.available = false;
            if course.id.is_empty() {
                course.id = course.code.clone();
            }
            result.push(course);
        }

        result
    }

    /// 悬空引用只记录日志，解析时视为永远未满足
    fn report_dangling_codes(
        courses: &[Course],
        badges: &[SpecialRule],
        index: &HashMap<String, usize>,
    ) {
        let course_refs = courses
            .iter()
            .flat_map(|c| c.prerequisites.iter().map(move |p| (c.code.as_str(), p)));
        let badge_refs = badges
            .iter()
            .flat_map(|b| b.requirements.iter().map(move |r| (b.id.as_str(), r)));

        for (owner, requirement) in course_refs.chain(badge_refs) {
            for code in requirement.referenced_codes() {
                if !index.contains_key(code) {
                    debug!(owner = %owner, code = %code, "引用了目录中不存在的课程");
                }
            }
        }
    }
}

impl Default for CatalogCompiler {
    fn default() -> Self {
        Self::new()
    }
}
