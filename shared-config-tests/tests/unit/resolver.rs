//! Unit tests for path resolution
//!
//! These tests verify machine-over-shared priority against real temporary
//! directories and against the recording mock probe.

use shared_config::resolver::{resolve, ResolutionReport, ResolveError};
use std::fs;
use std::path::PathBuf;
use test_utils::{
    machine_display_settings, shared_display_settings, shared_mouse_settings, ConfigBuilder,
    MockProbe, ResolutionKind, ResolutionRequest, ResolutionResult, Resolver,
};

#[test]
fn test_machine_specific_has_priority() {
    let builder = ConfigBuilder::minimal();
    let machine_file = builder.write_machine_file("display.json", &machine_display_settings().to_string());
    builder.write_shared_file("display.json", &shared_display_settings().to_string());

    let result = resolve("display.json", builder.machine_root(), builder.shared_root()).unwrap();

    assert_eq!(result, ResolutionResult::Machine(machine_file.clone()));

    let loaded: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(machine_file).unwrap()).unwrap();
    assert_eq!(loaded["Theme"], "Dark");
}

#[test]
fn test_falls_back_to_shared() {
    let builder = ConfigBuilder::minimal();
    let shared_file = builder.write_shared_file("mouse.json", &shared_mouse_settings().to_string());

    let result = resolve("mouse.json", builder.machine_root(), builder.shared_root()).unwrap();

    assert_eq!(result, ResolutionResult::Shared(shared_file));
}

#[test]
fn test_neither_root_has_item() {
    let builder = ConfigBuilder::minimal();

    let result = resolve("sound.json", builder.machine_root(), builder.shared_root()).unwrap();

    assert_eq!(result, ResolutionResult::NotFound);
    assert_eq!(result.kind(), ResolutionKind::NotFound);
}

#[test]
fn test_missing_roots_are_not_errors() {
    // Roots that do not exist yet simply hold nothing
    let builder = ConfigBuilder::new();

    let result = resolve("display.json", builder.machine_root(), builder.shared_root()).unwrap();
    assert_eq!(result, ResolutionResult::NotFound);
}

#[test]
fn test_invalid_machine_file_still_wins() {
    let builder = ConfigBuilder::minimal();
    let machine_file = builder.write_machine_file("display.json", "not even json");
    builder.write_shared_file("display.json", &shared_display_settings().to_string());

    let result = resolve("display.json", builder.machine_root(), builder.shared_root()).unwrap();
    assert_eq!(result, ResolutionResult::Machine(machine_file));
}

#[test]
fn test_nested_relative_paths() {
    let builder = ConfigBuilder::minimal();
    let shared_file = builder.write_shared_file("registry/explorer/settings.json", "{}");

    let result = resolve(
        "registry/explorer/settings.json",
        builder.machine_root(),
        builder.shared_root(),
    )
    .unwrap();
    assert_eq!(result, ResolutionResult::Shared(shared_file));
}

#[test]
fn test_machine_directory_shadows_shared_file() {
    let builder = ConfigBuilder::minimal();
    fs::create_dir_all(builder.machine_root().join("registry")).unwrap();
    builder.write_shared_file("registry/app.json", "{}");

    let result = resolve("registry", builder.machine_root(), builder.shared_root()).unwrap();
    assert_eq!(result.kind(), ResolutionKind::Machine);
}

#[test]
fn test_probe_order_is_machine_then_shared() {
    let probe = MockProbe::new();
    let resolver = Resolver::with_probe(probe.clone());

    let request = ResolutionRequest::new("sound.json", "/roots/PC", "/roots/shared");
    resolver.resolve(&request).unwrap();

    assert_eq!(
        probe.get_calls(),
        vec![
            PathBuf::from("/roots/PC/sound.json"),
            PathBuf::from("/roots/shared/sound.json"),
        ]
    );
}

#[test]
fn test_machine_hit_skips_shared_probe() {
    let probe = MockProbe::new().with_entry("/roots/PC/display.json");
    let resolver = Resolver::with_probe(probe.clone());

    let request = ResolutionRequest::new("display.json", "/roots/PC", "/roots/shared");
    let result = resolver.resolve(&request).unwrap();

    assert_eq!(result.kind(), ResolutionKind::Machine);
    assert!(!probe.was_probed(&PathBuf::from("/roots/shared/display.json")));
}

#[test]
fn test_invalid_arguments() {
    let resolver = Resolver::with_probe(MockProbe::new());

    for request in [
        ResolutionRequest::new("a.json", "", "/shared"),
        ResolutionRequest::new("a.json", "/machine", ""),
        ResolutionRequest::new("", "/machine", "/shared"),
        ResolutionRequest::new("/abs/a.json", "/machine", "/shared"),
    ] {
        assert!(matches!(
            resolver.resolve(&request),
            Err(ResolveError::InvalidArgument(_))
        ));
    }
}

#[test]
fn test_report_shape() {
    let report = ResolutionReport::from(&ResolutionResult::Machine(PathBuf::from("/m/a.json")));
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        serde_json::json!({"kind": "machine", "path": "/m/a.json"})
    );

    let parsed: ResolutionReport =
        serde_json::from_str(r#"{"kind": "not_found", "path": null}"#).unwrap();
    assert_eq!(parsed.kind, ResolutionKind::NotFound);
    assert!(parsed.path.is_none());
}
