//! test_utils 模块的集成测试
//!
//! 验证测试数据生成器产出的 JSON 结构

use course_shared::test_utils::*;
use serde_json::json;

// ==================== 测试数据生成器测试 ====================

#[test]
fn test_course_with_prerequisites() {
    let course = TestDataGenerator::course_with_prerequisites(
        "A002",
        "Follow-up",
        vec![TestDataGenerator::course_requirement("A001")],
    );

    assert_eq!(course["code"], "A002");
    assert_eq!(course["prerequisites"][0], json!({"type": "course", "code": "A001"}));
}

#[test]
fn test_complex_requirement() {
    let requirement = TestDataGenerator::complex_requirement("Captain's approval");

    assert_eq!(requirement["type"], "complex");
    assert_eq!(requirement["description"], "Captain's approval");
}

#[test]
fn test_badge_generation() {
    let badge = TestDataGenerator::badge(
        "command",
        "Command Qualification",
        vec![TestDataGenerator::department_choice(2, "advanced", &["Tactical", "Engineering"])],
    );

    TestAssertions::assert_json_has_field(&badge, "branch");
    assert_eq!(badge["requirements"][0]["departments"][1], "Engineering");
}

// ==================== Fixture 测试 ====================

#[test]
fn test_department_badge_scenario() {
    let catalog = CatalogFixture::department_badge_scenario().build();

    assert_eq!(catalog["departments"].as_array().map(Vec::len), Some(3));
    assert_eq!(catalog["badges"][0]["id"], "command");
    assert!(catalog["aliases"].as_object().is_some_and(|a| a.is_empty()));
}

#[test]
fn test_fixture_builder_chain() {
    let catalog = CatalogFixture::new("custom")
        .with_course(TestDataGenerator::course("Z001", "Solo", "Science", "warrant"))
        .with_department(TestDataGenerator::department("Science", &["Science", "Sciences"]))
        .with_alias("Z-OLD", "Z001")
        .build();

    TestAssertions::assert_json_field_eq(&catalog, &json!({"version": "custom"}), "version");
    assert_eq!(catalog["courses"][0]["level"], "warrant");
    assert_eq!(catalog["aliases"]["Z-OLD"], "Z001");
}
