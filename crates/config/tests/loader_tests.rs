//! Tests for the configuration loader: default handling, file discovery via
//! `USERDESK_CONFIG`, and environment overrides.

use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use userdesk_config::load;

const ENV_VARS_TO_RESET: &[&str] = &[
    "USERDESK_CONFIG",
    "USERDESK__HTTP__ADDRESS",
    "USERDESK__HTTP__PORT",
    "USERDESK__DATABASE__URL",
    "USERDESK__DATABASE__MAX_CONNECTIONS",
    "USERDESK__AUTH__SESSION_TTL_SECONDS",
    "USERDESK__BOOTSTRAP__ADMIN_USERNAME",
    "USERDESK__BOOTSTRAP__ADMIN_PASSWORD",
];

fn reset_environment() {
    for key in ENV_VARS_TO_RESET {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn load_falls_back_to_defaults() {
    reset_environment();

    let config = load().expect("defaults should load");

    assert_eq!(config.http.address, "127.0.0.1");
    assert_eq!(config.http.port, 8080);
    assert_eq!(config.database.url, "sqlite://userdesk.db");
    assert_eq!(config.auth.session_ttl_seconds, 86_400);
}

#[test]
#[serial]
fn environment_variables_override_defaults() {
    reset_environment();
    std::env::set_var("USERDESK__HTTP__PORT", "9999");
    std::env::set_var("USERDESK__DATABASE__URL", "sqlite://override.db");

    let config = load().expect("overridden config should load");

    assert_eq!(config.http.port, 9999);
    assert_eq!(config.database.url, "sqlite://override.db");

    reset_environment();
}

#[test]
#[serial]
fn explicit_config_file_is_honoured() {
    reset_environment();

    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("userdesk.toml");
    fs::write(
        &path,
        r#"
[http]
address = "0.0.0.0"
port = 7000

[bootstrap]
admin_username = "root"
admin_password = "RootPassw0rd"
"#,
    )
    .expect("write config file");

    std::env::set_var("USERDESK_CONFIG", &path);

    let config = load().expect("file-backed config should load");

    assert_eq!(config.http.address, "0.0.0.0");
    assert_eq!(config.http.port, 7000);
    assert_eq!(config.bootstrap.admin_username.as_deref(), Some("root"));
    assert_eq!(config.bootstrap.admin_password.as_deref(), Some("RootPassw0rd"));

    reset_environment();
}

#[test]
#[serial]
fn environment_overrides_win_over_file_values() {
    reset_environment();

    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("userdesk.toml");
    fs::write(
        &path,
        r#"
[auth]
session_ttl_seconds = 120
"#,
    )
    .expect("write config file");

    std::env::set_var("USERDESK_CONFIG", &path);
    std::env::set_var("USERDESK__AUTH__SESSION_TTL_SECONDS", "3600");

    let config = load().expect("config should load");

    assert_eq!(config.auth.session_ttl_seconds, 3_600);

    reset_environment();
}
