//! 测试工具模块
//!
//! 提供集成测试所需的目录、学习进度 JSON 数据生成器和断言辅助。
//! 生成的都是 `serde_json::Value`，由调用方反序列化成各自的模型。

use serde_json::{Value, json};

// ==================== 测试数据生成器 ====================

/// 测试数据生成器
pub struct TestDataGenerator;

impl TestDataGenerator {
    /// 课程
    pub fn course(code: &str, name: &str, section: &str, level: &str) -> Value {
        json!({
            "code": code,
            "name": name,
            "section": section,
            "level": level,
            "prerequisites": []
        })
    }

    /// 带先修要求的课程
    pub fn course_with_prerequisites(code: &str, name: &str, prerequisites: Vec<Value>) -> Value {
        json!({
            "code": code,
            "name": name,
            "prerequisites": prerequisites
        })
    }

    /// 单门课程要求
    pub fn course_requirement(code: &str) -> Value {
        json!({ "type": "course", "code": code })
    }

    /// 多选一组
    pub fn alternative_group(alternatives: Vec<Value>) -> Value {
        json!({ "type": "alternative_group", "alternatives": alternatives })
    }

    /// 部门配额要求
    pub fn department_choice(minimum: u32, level: &str, departments: &[&str]) -> Value {
        json!({
            "type": "department_choice",
            "minimum": minimum,
            "level": level,
            "departments": departments
        })
    }

    /// 需要人工判定的要求
    pub fn complex_requirement(description: &str) -> Value {
        json!({ "type": "complex", "description": description })
    }

    /// 徽章
    pub fn badge(id: &str, name: &str, requirements: Vec<Value>) -> Value {
        json!({
            "id": id,
            "name": name,
            "branch": "Fleet",
            "rank": "",
            "requirements": requirements
        })
    }

    /// 部门映射项
    pub fn department(name: &str, matches: &[&str]) -> Value {
        json!({ "department": name, "matches": matches })
    }

    /// 学习进度快照
    pub fn progress(completed: &[&str], in_progress: &[&str]) -> Value {
        json!({
            "completed": completed,
            "in_progress": in_progress,
            "waiting_for_grade": [],
            "available": []
        })
    }
}

// ==================== 断言辅助 ====================

/// 测试断言辅助结构
pub struct TestAssertions;

impl TestAssertions {
    /// 断言两个 JSON 值在指定字段上相等
    pub fn assert_json_field_eq(actual: &Value, expected: &Value, field: &str) {
        let actual_val = actual.get(field);
        let expected_val = expected.get(field);
        assert_eq!(
            actual_val, expected_val,
            "Field '{}' mismatch: actual={:?}, expected={:?}",
            field, actual_val, expected_val
        );
    }

    /// 断言 JSON 包含指定字段
    pub fn assert_json_has_field(value: &Value, field: &str) {
        assert!(
            value.get(field).is_some(),
            "Expected JSON to have field '{}', but it was missing. Value: {:?}",
            field,
            value
        );
    }
}

// ==================== 测试 Fixture ====================

/// 目录 Fixture 构建器
#[derive(Debug, Clone)]
pub struct CatalogFixture {
    pub version: String,
    pub courses: Vec<Value>,
    pub badges: Vec<Value>,
    pub departments: Vec<Value>,
    pub aliases: Vec<(String, String)>,
}

impl CatalogFixture {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            courses: Vec::new(),
            badges: Vec::new(),
            departments: Vec::new(),
            aliases: Vec::new(),
        }
    }

    pub fn with_course(mut self, course: Value) -> Self {
        self.courses.push(course);
        self
    }

    pub fn with_badge(mut self, badge: Value) -> Self {
        self.badges.push(badge);
        self
    }

    pub fn with_department(mut self, department: Value) -> Self {
        self.departments.push(department);
        self
    }

    /// 添加别名（旧代码 -> 主代码）
    pub fn with_alias(mut self, alias: &str, canonical: &str) -> Self {
        self.aliases.push((alias.to_string(), canonical.to_string()));
        self
    }

    /// 构建目录 JSON
    pub fn build(&self) -> Value {
        let aliases: serde_json::Map<String, Value> = self
            .aliases
            .iter()
            .map(|(alias, canonical)| (alias.clone(), Value::String(canonical.clone())))
            .collect();

        json!({
            "version": self.version,
            "courses": self.courses,
            "badges": self.badges,
            "departments": self.departments,
            "aliases": aliases
        })
    }

    /// 构建标准测试场景：基础课程链 + 多选一 + 需要人工判定的课程
    pub fn prerequisite_chain_scenario() -> Self {
        Self::new("chain")
            .with_course(TestDataGenerator::course("A001", "Basics", "Academy", "introductory"))
            .with_course(TestDataGenerator::course_with_prerequisites(
                "A002",
                "Follow-up",
                vec![TestDataGenerator::course_requirement("A001")],
            ))
            .with_course(TestDataGenerator::course("B001", "Option one", "Academy", "introductory"))
            .with_course(TestDataGenerator::course("B002", "Option two", "Academy", "introductory"))
            .with_course(TestDataGenerator::course_with_prerequisites(
                "C001",
                "Either option",
                vec![TestDataGenerator::alternative_group(vec![
                    TestDataGenerator::course_requirement("B001"),
                    TestDataGenerator::course_requirement("B002"),
                ])],
            ))
            .with_course(TestDataGenerator::course_with_prerequisites(
                "D001",
                "Board review",
                vec![
                    TestDataGenerator::course_requirement("A002"),
                    TestDataGenerator::complex_requirement("Approval of the review board"),
                ],
            ))
    }

    /// 构建标准测试场景：部门配额徽章
    pub fn department_badge_scenario() -> Self {
        Self::new("departments")
            .with_department(TestDataGenerator::department("Tactical", &["Tactical"]))
            .with_department(TestDataGenerator::department("Engineering", &["Engineering"]))
            .with_department(TestDataGenerator::department("Medical", &["Medical"]))
            .with_course(TestDataGenerator::course("X001", "Core", "Academy", "introductory"))
            .with_course(TestDataGenerator::course("T-D1", "Tactical D", "Tactical", "advanced"))
            .with_course(TestDataGenerator::course("E-D1", "Engineering D", "Engineering", "advanced"))
            .with_course(TestDataGenerator::course("M-D1", "Medical D", "Medical", "advanced"))
            .with_course(TestDataGenerator::course("T-A1", "Tactical A", "Tactical", "introductory"))
            .with_badge(TestDataGenerator::badge(
                "command",
                "Command Qualification",
                vec![
                    TestDataGenerator::course_requirement("X001"),
                    TestDataGenerator::department_choice(2, "advanced", &["Tactical", "Engineering"]),
                ],
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_generator() {
        let course = TestDataGenerator::course("A001", "Basics", "Academy", "introductory");

        TestAssertions::assert_json_has_field(&course, "prerequisites");
        assert_eq!(course["code"], "A001");
        assert_eq!(course["level"], "introductory");
    }

    #[test]
    fn test_requirement_generators_are_tagged() {
        let group = TestDataGenerator::alternative_group(vec![
            TestDataGenerator::course_requirement("B001"),
            TestDataGenerator::course_requirement("B002"),
        ]);

        assert_eq!(group["type"], "alternative_group");
        assert_eq!(group["alternatives"][1]["code"], "B002");
        assert_eq!(
            TestDataGenerator::department_choice(2, "advanced", &["Tactical"])["minimum"],
            2
        );
    }

    #[test]
    fn test_catalog_fixture_build() {
        let catalog = CatalogFixture::prerequisite_chain_scenario()
            .with_alias("OLD-A001", "A001")
            .build();

        assert_eq!(catalog["version"], "chain");
        assert_eq!(catalog["courses"].as_array().map(Vec::len), Some(6));
        assert_eq!(catalog["aliases"]["OLD-A001"], "A001");
    }

    #[test]
    fn test_progress_generator() {
        let progress = TestDataGenerator::progress(&["A001"], &["A002"]);
        let expected = json!({"completed": ["A001"]});

        TestAssertions::assert_json_field_eq(&progress, &expected, "completed");
    }
}
