#![allow(clippy::unwrap_used)]

use sprig_config::{ConfigError, ConfigFormat, ConfigLoader, SprigConfig, Validator, CONFIG_FILE};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test]
async fn test_load_toml_config() {
    let loader = ConfigLoader::new();
    let toml_content = r#"
[core]
cache_capacity = 256
lock_timeout_ms = 250

[remote]
timeout_secs = 10

[log]
level = "info"
format = "json"
"#;

    let config = loader.load_from_string(toml_content, ConfigFormat::Toml).unwrap();
    assert_eq!(config.core.cache_capacity, 256);
    assert_eq!(config.core.lock_timeout(), Duration::from_millis(250));
    assert_eq!(config.remote.timeout(), Duration::from_secs(10));
    assert_eq!(config.log.format, "json");
}

#[tokio::test]
async fn test_partial_config_takes_defaults() {
    let loader = ConfigLoader::new();
    let config = loader
        .load_from_string("[log]\nlevel = \"debug\"\n", ConfigFormat::Toml)
        .unwrap();

    assert_eq!(config.log.level, "debug");
    assert_eq!(config.core, SprigConfig::default().core);
    assert_eq!(config.remote.timeout_secs, 30);
}

#[tokio::test]
async fn test_load_file_by_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sprig.yaml");
    fs::write(&path, "remote:\n  timeout_secs: 3\n").unwrap();

    let config = ConfigLoader::new().load_file(&path).await.unwrap();
    assert_eq!(config.remote.timeout_secs, 3);
}

#[tokio::test]
async fn test_load_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = ConfigLoader::new()
        .load_file(temp.path().join("absent.toml"))
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(_)));
}

#[tokio::test]
async fn test_invalid_toml_reports_parse_error() {
    let err = ConfigLoader::new()
        .load_from_string("[core\ncache_capacity = ", ConfigFormat::Toml)
        .unwrap_err();
    assert!(matches!(err, ConfigError::TomlParseError(_)));
}

#[tokio::test]
async fn test_repository_config_defaults_when_absent() {
    let temp = TempDir::new().unwrap();
    let config = SprigConfig::load(temp.path()).await.unwrap();
    assert_eq!(config, SprigConfig::default());
}

#[tokio::test]
async fn test_save_then_load() {
    let temp = TempDir::new().unwrap();
    let mut config = SprigConfig::default();
    config.core.cache_capacity = 32;
    config.log.level = "error".to_string();

    config.save(temp.path()).await.unwrap();
    assert!(temp.path().join(CONFIG_FILE).is_file());

    let loaded = SprigConfig::load(temp.path()).await.unwrap();
    assert_eq!(loaded.core.cache_capacity, 32);
    assert_eq!(loaded.log.level, "error");
    assert!(loaded.validate().is_ok());
}

#[tokio::test]
async fn test_repository_config_rejects_invalid_values() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(CONFIG_FILE), "[core]\ncache_capacity = 0\n").unwrap();

    let err = SprigConfig::load(temp.path()).await.unwrap_err();
    assert!(err.to_string().contains("core.cache_capacity"));
}
