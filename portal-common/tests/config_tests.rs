//! Configuration loading and database path resolution tests
//!
//! Tests that manipulate PORTAL_DATABASE are marked with #[serial]
//! so they never race each other on the process environment.

use portal_common::config::{load_toml_config, resolve_database_path, TomlConfig};
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_missing_config_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = load_toml_config(&temp_dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.port, 5780);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.search.source_timeout_ms, 5000);
}

#[test]
fn test_full_config_file_is_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("portal-search.toml");
    std::fs::write(
        &path,
        r#"
database_path = "/srv/portal/portal.db"
port = 8088
bind_address = "0.0.0.0"

[logging]
level = "debug"

[search]
source_timeout_ms = 750
"#,
    )
    .unwrap();

    let config = load_toml_config(&path).unwrap();
    assert_eq!(config.database_path, Some(PathBuf::from("/srv/portal/portal.db")));
    assert_eq!(config.port, 8088);
    assert_eq!(config.bind_address, "0.0.0.0");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.search.source_timeout_ms, 750);
}

#[test]
fn test_malformed_config_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    std::fs::write(&path, "port = \"not a number\"\n[logging\n").unwrap();

    let err = load_toml_config(&path).unwrap_err();
    assert!(err.to_string().contains("Configuration error"), "got: {}", err);
}

#[test]
fn test_zero_source_timeout_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("zero.toml");
    std::fs::write(&path, "[search]\nsource_timeout_ms = 0\n").unwrap();

    assert!(load_toml_config(&path).is_err());
}

#[test]
#[serial]
fn test_env_var_overrides_toml() {
    env::set_var("PORTAL_DATABASE", "/tmp/portal-env.db");

    let config = TomlConfig {
        database_path: Some(PathBuf::from("/tmp/portal-toml.db")),
        ..TomlConfig::default()
    };
    let resolved = resolve_database_path(None, "PORTAL_DATABASE", &config);
    assert_eq!(resolved, PathBuf::from("/tmp/portal-env.db"));

    env::remove_var("PORTAL_DATABASE");
}

#[test]
#[serial]
fn test_cli_overrides_env_var() {
    env::set_var("PORTAL_DATABASE", "/tmp/portal-env.db");

    let resolved = resolve_database_path(
        Some(Path::new("/tmp/portal-cli.db")),
        "PORTAL_DATABASE",
        &TomlConfig::default(),
    );
    assert_eq!(resolved, PathBuf::from("/tmp/portal-cli.db"));

    env::remove_var("PORTAL_DATABASE");
}

#[test]
#[serial]
fn test_blank_env_var_is_ignored() {
    env::set_var("PORTAL_DATABASE", "   ");

    let config = TomlConfig {
        database_path: Some(PathBuf::from("/tmp/portal-toml.db")),
        ..TomlConfig::default()
    };
    let resolved = resolve_database_path(None, "PORTAL_DATABASE", &config);
    assert_eq!(resolved, PathBuf::from("/tmp/portal-toml.db"));

    env::remove_var("PORTAL_DATABASE");
}
