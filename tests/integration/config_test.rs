//! Integration tests for configuration loading.

use sharelink_core::config::AppConfig;
use sharelink_core::error::ErrorKind;

#[test]
fn test_fixture_config_loads() {
    let config = AppConfig::load("tests/fixtures/test_config", "test").unwrap();
    assert_eq!(config.cache.provider, "memory");
    assert_eq!(config.share.login_window().as_secs(), 300);
    assert_eq!(config.share.host_url, "https://share.example.com");
}

#[test]
fn test_shipped_default_config_loads() {
    let config = AppConfig::load("config/default", "test").unwrap();
    assert_eq!(config.share.message_window().as_secs(), 86400);
    assert_eq!(config.logging.format, "pretty");
}

#[test]
fn test_missing_cipher_is_a_configuration_error() {
    let err = AppConfig::load("tests/fixtures/does_not_exist", "test").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}
