//! 数据文件与配置加载的集成测试

use course_shared::config::AppConfig;
use course_shared::data::read_json_file;
use course_shared::test_utils::CatalogFixture;
use serde_json::Value;
use std::fs;

#[test]
fn test_catalog_path_from_config_is_readable() {
    let dir = std::env::temp_dir().join(format!("course-shared-it-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    let catalog_path = dir.join("catalog.json");
    fs::write(
        &catalog_path,
        CatalogFixture::prerequisite_chain_scenario().build().to_string(),
    )
    .unwrap();
    fs::write(
        dir.join("requirement-engine.toml"),
        format!(
            "[data]\ncatalog_path = {:?}\n",
            catalog_path.to_string_lossy()
        ),
    )
    .unwrap();

    let config = AppConfig::load_from("requirement-engine", "development", &dir).unwrap();
    let path = config.data.catalog_path.expect("catalog_path 应该已配置");
    let catalog: Value = read_json_file(&path).unwrap();

    assert_eq!(catalog["version"], "chain");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_invalid_config_file_is_config_error() {
    let dir = std::env::temp_dir().join(format!("course-shared-bad-config-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("default.toml"), "[engine\nresolve_aliases = ").unwrap();

    let result = AppConfig::load_from("requirement-engine", "development", &dir);
    assert!(result.is_err());

    fs::remove_dir_all(&dir).unwrap();
}
