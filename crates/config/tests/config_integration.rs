//! Integration tests for the lookout-config crate.

use std::fs;
use std::time::Duration;

use lookout_config::{ApiConfig, CacheConfig, Config};
use tempfile::TempDir;

#[test]
fn config_load_from_json5_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("lookout.json5");

    fs::write(
        &config_path,
        r#"
        {
            // Configuration for lookout
            auth_token: "sntrys_test_token",
            api: {
                base_url: "https://sentry.example.com/api/0",
                timeout_ms: 2500,
            },
            cache: {
                ttl_secs: 120,
                check_period_secs: 30,
            },
        }
        "#,
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert_eq!(config.auth_token, Some("sntrys_test_token".to_string()));
    assert_eq!(config.api.base_url, "https://sentry.example.com/api/0");
    assert_eq!(config.api.timeout(), Duration::from_millis(2500));
    assert_eq!(config.cache.ttl(), Duration::from_secs(120));
    assert_eq!(config.cache.check_period(), Duration::from_secs(30));
    assert!(config.cache.enabled);
}

#[test]
fn config_disabled_cache_round_trips_through_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(
        &config_path,
        r#"{"api": {"base_url": "http://localhost:9000/api/0"}, "cache": {"enabled": false}}"#,
    )
    .unwrap();

    let loaded = Config::load_from(&config_path).unwrap();
    assert_eq!(
        loaded,
        Config {
            auth_token: None,
            api: ApiConfig::with_base_url("http://localhost:9000/api/0"),
            cache: CacheConfig::disabled(),
        }
    );
}

#[test]
fn config_load_nonexistent_fails() {
    let result = Config::load_from("/nonexistent/path/config.json");
    assert!(result.is_err());
}

#[test]
fn config_load_empty_object_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("lookout.json");
    fs::write(&config_path, "{}").unwrap();

    let config = Config::load_from(&config_path).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.api.base_url, "https://sentry.io/api/0");
    assert_eq!(config.api.timeout(), Duration::from_millis(5000));
    assert_eq!(config.cache.ttl(), Duration::from_secs(300));
    assert_eq!(config.cache.check_period(), Duration::from_secs(60));
}

#[test]
fn config_validation() {
    let valid = Config {
        auth_token: Some("sntrys_xxx".to_string()),
        api: ApiConfig::default(),
        cache: CacheConfig::with_ttl(60),
    };
    assert!(valid.validate().is_ok());

    let invalid = Config {
        api: ApiConfig::with_base_url("not-a-url"),
        ..Default::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn config_auth_token_not_serialized_when_none() {
    let json = serde_json::to_string(&Config::default()).unwrap();
    assert!(!json.contains("auth_token"));
}
