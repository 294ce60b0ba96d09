//! Test fixtures and sample data
//!
//! Settings documents shaped like the ones a Windows configuration backup
//! keeps per machine and in the shared folder.

use serde_json::json;
use shared_config::merge::{ConfigValue, Mapping};

/// Convert a `json!` object literal into a mapping
pub fn mapping(value: ConfigValue) -> Mapping {
    match value {
        ConfigValue::Object(map) => map,
        other => panic!("Expected a JSON object, got {}", other),
    }
}

/// Display settings saved on this machine
pub fn machine_display_settings() -> ConfigValue {
    json!({
        "Theme": "Dark",
        "Resolution": {"Width": 2560, "Height": 1440},
        "Monitors": ["DELL U2720Q", "LG 27GL850"]
    })
}

/// Display settings saved in the shared folder
pub fn shared_display_settings() -> ConfigValue {
    json!({
        "Theme": "Light",
        "Resolution": {"Width": 1920, "Height": 1080},
        "Scale": 125
    })
}

/// Mouse settings that only exist in the shared folder
pub fn shared_mouse_settings() -> ConfigValue {
    json!({
        "Speed": 10,
        "DoubleClickTime": 500,
        "SwapButtons": false
    })
}

/// Application defaults used as the merge base
pub fn app_defaults() -> Mapping {
    mapping(json!({
        "Application": {
            "Name": "Shared Test App",
            "Version": "1.0.0",
            "Features": {"AutoUpdate": true, "Telemetry": false}
        },
        "Paths": {"Exclude": ["*.tmp", "*.log"]},
        "Owner": "shared"
    }))
}

/// Machine-specific application overrides
pub fn app_machine_overrides() -> Mapping {
    mapping(json!({
        "Application": {
            "Version": "1.2.0",
            "Features": {"Telemetry": true}
        },
        "Paths": {"Exclude": ["*.bak"]},
        "Owner": null,
        "MachineOnly": {"GpuAcceleration": true}
    }))
}

/// Minimal valid config TOML template
pub fn minimal_config_toml() -> &'static str {
    r#"
[global]
backup_root = "{backup_root}"
machine_name = "{machine_name}"
log_directory = "{log_dir}"

[items.display]
path = "display.json"
description = "Display settings"

[items.display.defaults]
Theme = "Light"
Scale = 100
"#
}

/// Fill the placeholders of [`minimal_config_toml`]
pub fn render_minimal_config(backup_root: &str, machine_name: &str, log_dir: &str) -> String {
    minimal_config_toml()
        .replace("{backup_root}", &backup_root.replace('\\', "/"))
        .replace("{machine_name}", machine_name)
        .replace("{log_dir}", &log_dir.replace('\\', "/"))
}
