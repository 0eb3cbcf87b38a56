use std::fs;

use spendlog_config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert_eq!(cfg.default_period, "month");
    assert!(!cfg.log_filter.is_empty());
    assert!(cfg.ui_color_enabled);
}

#[test]
fn missing_config_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    assert_eq!(manager.load().expect("load"), Config::default());
    assert!(manager.config_path().ends_with("config/config.json"));
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.default_period = "year".to_string();
    cfg.ui_color_enabled = false;
    cfg.data_root = Some(dir.path().join("elsewhere"));

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert_eq!(
        loaded.resolve_data_root(dir.path()),
        dir.path().join("elsewhere")
    );
}

#[test]
fn partial_config_fills_missing_fields_with_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "default_period": "range" }"#).expect("write");

    let loaded = ConfigManager::new(path).load().expect("load");
    assert_eq!(loaded.default_period, "range");
    assert_eq!(loaded.log_filter, Config::default_log_filter());
    assert_eq!(loaded.resolve_data_root(dir.path()), dir.path().join("store"));
}

#[test]
fn malformed_config_reports_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, "{").expect("write");

    let err = ConfigManager::new(path).load().unwrap_err();
    assert!(matches!(err, ConfigError::Serde(_)));
}
