//! Unit tests for configuration loading and validation
//!
//! These tests verify config parsing, validation, and root derivation.

use serial_test::serial;
use shared_config::config::{enabled_items, load_config, resolve_roots, ConfigError};
use std::path::PathBuf;
use test_utils::{render_minimal_config, ConfigBuilder, ResultAssertions, TestContext};

#[test]
fn test_config_loading_valid() {
    let (config_path, _, _temp_dir) = ConfigBuilder::minimal()
        .add_item("display", "display.json")
        .persist_to_file();

    let loaded = load_config(&config_path).assert_ok_msg("Config should load successfully");
    assert!(loaded.items.contains_key("display"));
}

#[test]
fn test_config_loading_from_template() {
    let ctx = TestContext::new();
    let backup_root = ctx.create_subdir("backups");
    let log_dir = ctx.create_subdir("logs");

    let content = render_minimal_config(
        &backup_root.to_string_lossy(),
        "WORKSTATION",
        &log_dir.to_string_lossy(),
    );
    let config_path = ctx.create_file("shared-config.toml", &content);

    let config = load_config(&config_path).assert_ok();
    let roots = resolve_roots(&config.global, None).assert_ok();

    assert_eq!(roots.machine_root, backup_root.join("WORKSTATION"));
    assert_eq!(roots.shared_root, backup_root.join("shared"));
    assert_eq!(config.items["display"].defaults["Theme"], "Light");
}

#[test]
fn test_config_missing_file() {
    let ctx = TestContext::new();
    let result = load_config(ctx.temp_dir().join("missing.toml"));
    assert!(matches!(result, Err(ConfigError::ReadError(_))));
}

#[test]
fn test_config_invalid_toml() {
    let ctx = TestContext::new();
    let config_path = ctx.create_file("shared-config.toml", "invalid { toml content");

    let result = load_config(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_config_item_missing_path() {
    let ctx = TestContext::new();
    let config_path = ctx.create_file(
        "shared-config.toml",
        r#"
[global]
backup_root = "/backups"

[items.display]
description = "No path"
"#,
    );

    let result = load_config(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_config_empty_item_path() {
    let ctx = TestContext::new();
    let config_path = ctx.create_file(
        "shared-config.toml",
        r#"
[global]
backup_root = "/backups"

[items.display]
path = "  "
"#,
    );

    load_config(&config_path).assert_err_contains("path must not be empty");
}

#[test]
fn test_config_explicit_roots_without_backup_root() {
    let ctx = TestContext::new();
    let machine = ctx.create_subdir("machine");
    let shared = ctx.create_subdir("team");
    let mut config = ConfigBuilder::new()
        .with_explicit_roots(&machine, &shared)
        .build();
    config.global.backup_root = None;

    let roots = resolve_roots(&config.global, None).assert_ok();
    assert_eq!(roots.machine_root, machine);
    assert_eq!(roots.shared_root, shared);
}

#[test]
fn test_config_only_machine_root_needs_backup_root() {
    let ctx = TestContext::new();
    let config_path = ctx.create_file(
        "shared-config.toml",
        r#"
[global]
machine_root = "/roots/PC"
"#,
    );

    load_config(&config_path).assert_err_contains("shared_root cannot be derived");
}

#[test]
fn test_config_empty_machine_name_rejected() {
    let ctx = TestContext::new();
    let config_path = ctx.create_file(
        "shared-config.toml",
        r#"
[global]
backup_root = "/backups"
machine_name = ""
"#,
    );

    load_config(&config_path).assert_err_contains("machine_name must not be empty");
}

#[test]
fn test_custom_shared_dir_name() {
    let ctx = TestContext::new();
    let config_path = ctx.create_file(
        "shared-config.toml",
        r#"
[global]
backup_root = "/backups"
machine_name = "PC"
shared_dir_name = "team"
"#,
    );

    let config = load_config(&config_path).assert_ok();
    let roots = resolve_roots(&config.global, None).assert_ok();
    assert_eq!(roots.shared_root, PathBuf::from("/backups/team"));
}

#[test]
#[serial]
fn test_machine_name_required_when_unset() {
    let mut config = ConfigBuilder::new().build();
    config.global.machine_name = None;

    let saved: Vec<_> = ["COMPUTERNAME", "HOSTNAME"]
        .iter()
        .map(|var| (*var, std::env::var(var).ok()))
        .collect();
    for (var, _) in &saved {
        std::env::remove_var(var);
    }

    let result = resolve_roots(&config.global, None);

    for (var, value) in saved {
        if let Some(value) = value {
            std::env::set_var(var, value);
        }
    }

    result.assert_err_contains("machine name unknown");
}

#[test]
fn test_enabled_items_skip_disabled() {
    let config = ConfigBuilder::minimal()
        .add_item("display", "display.json")
        .add_disabled_item("mouse", "mouse.json")
        .add_item("apps", "apps/winget.json")
        .build();

    let names: Vec<&str> = enabled_items(&config).into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["apps", "display"]);
}
