use std::fs;

use calendar_console::config::ConsoleConfig;
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tracing::Level;

fn settings_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}

#[test]
fn test_defaults_with_database_url() {
    let dir = settings_dir(&[("appsettings.json", r#"{ "database_url": "postgres://localhost/calendar" }"#)]);

    let config = ConsoleConfig::from_files(dir.path(), None).unwrap();

    assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/calendar"));
    assert!(!config.in_memory);
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.max_connections, 5);
    assert_eq!(config.scheduler.default_duration_minutes, 30);
}

#[test]
fn test_environment_file_overrides_base_file() {
    let dir = settings_dir(&[
        (
            "appsettings.json",
            r#"{ "database_url": "postgres://localhost/calendar", "log_level": "warn" }"#,
        ),
        (
            "appsettings.Development.json",
            r#"{ "log_level": "debug", "default_duration_minutes": 45, "max_connections": 2 }"#,
        ),
    ]);

    let config = ConsoleConfig::from_files(dir.path(), Some("Development")).unwrap();

    assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/calendar"));
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(config.max_connections, 2);
    assert_eq!(config.scheduler.default_duration_minutes, 45);
}

#[test]
fn test_missing_environment_file_is_ignored() {
    let dir = settings_dir(&[("appsettings.json", r#"{ "in_memory": true }"#)]);

    let config = ConsoleConfig::from_files(dir.path(), Some("Staging")).unwrap();

    assert!(config.in_memory);
    assert_eq!(config.database_url, None);
}

#[test]
fn test_requires_database_url_unless_in_memory() {
    let dir = settings_dir(&[]);

    let result = ConsoleConfig::from_files(dir.path(), None);

    assert!(result.is_err());
}

#[test]
fn test_malformed_settings_file_is_an_error() {
    let dir = settings_dir(&[("appsettings.json", "{ not json")]);

    assert!(ConsoleConfig::from_files(dir.path(), None).is_err());
}
