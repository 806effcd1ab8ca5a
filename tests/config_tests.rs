//! Integration tests for configuration management

use advising_assistant::config::{Config, ConfigOverrides};
use advising_assistant::core::shell::SessionOptions;
use advising_assistant::core::LoadOptions;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(config.catalog.uppercase_queries);
    assert!(!config.catalog.rollback_on_failure);
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/advising.log"
verbose = true

[catalog]
default_file = "courses.csv"
uppercase_queries = false
rollback_on_failure = true
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/advising.log");
    assert!(config.logging.verbose);
    assert_eq!(config.catalog.default_file, "courses.csv");
    assert!(!config.catalog.uppercase_queries);
    assert!(config.catalog.rollback_on_failure);
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.catalog.default_file, "");
    assert!(config.catalog.uppercase_queries, "uppercasing defaults on");
    assert!(!config.catalog.rollback_on_failure);
}

#[test]
fn test_config_rejects_bad_types() {
    let toml_str = r#"
[catalog]
uppercase_queries = "sometimes"
"#;
    assert!(Config::from_toml(toml_str).is_err());
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$ADVISING_HOME/logs/advising.log"

[catalog]
default_file = "$ADVISING_HOME/courses.csv"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("advising"));
    assert!(!config.logging.file.contains("$ADVISING_HOME"));
    assert!(config.catalog.default_file.ends_with("courses.csv"));
    assert!(!config.catalog.default_file.contains("$ADVISING_HOME"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config
        .set("rollback-on-failure", "true")
        .expect("Failed to set rollback");
    assert_eq!(config.get("rollback_on_failure").unwrap(), "true");
    assert!(config.catalog.rollback_on_failure);

    config
        .set("default_file", "catalog.csv")
        .expect("Failed to set default_file");
    assert_eq!(config.get("default-file").unwrap(), "catalog.csv");

    assert!(config.set("uppercase_queries", "maybe").is_err());
    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config
        .set("uppercase_queries", "false")
        .expect("Failed to set uppercase_queries");
    assert!(!config.catalog.uppercase_queries);

    config
        .unset("uppercase_queries", &defaults)
        .expect("Failed to unset uppercase_queries");
    assert_eq!(
        config.catalog.uppercase_queries,
        defaults.catalog.uppercase_queries
    );
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_serialize_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");

    let mut config = Config::from_defaults();
    config.set("default_file", "fall.csv").expect("Failed to set");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded.catalog.default_file, "fall.csv");
    assert_eq!(loaded.logging.level, config.logging.level);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        default_file: Some("./spring.csv".to_string()),
        uppercase_queries: Some(false),
        rollback_on_failure: Some(true),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.catalog.default_file, "./spring.csv");
    assert!(!config.catalog.uppercase_queries);
    assert!(config.catalog.rollback_on_failure);
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.catalog.default_file.clone();

    config.apply_overrides(&ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    });

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.catalog.default_file, before);
}

#[test]
fn test_catalog_config_feeds_session_and_loader() {
    let mut config = Config::from_defaults();
    config.apply_overrides(&ConfigOverrides {
        default_file: Some("courses.csv".to_string()),
        rollback_on_failure: Some(true),
        ..ConfigOverrides::default()
    });

    let options = SessionOptions::from(&config.catalog);
    assert_eq!(options.default_file, Some(PathBuf::from("courses.csv")));
    assert!(options.load.rollback_on_failure);
    assert!(LoadOptions::from(&config.catalog).rollback_on_failure);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[catalog]"));
    assert!(display_str.contains("default_file"));
    assert!(display_str.contains("uppercase_queries"));
    assert!(display_str.contains("rollback_on_failure"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(
        config.merge_defaults(&defaults),
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.logging.level, defaults.logging.level);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[catalog]
default_file = "mine.csv"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    assert!(!config.merge_defaults(&defaults));
    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.catalog.default_file, "mine.csv");
}

#[test]
fn test_get_advising_dir() {
    let dir = Config::get_advising_dir();
    assert!(dir.to_string_lossy().contains("advising"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();
    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
