//! Tests for the 'merge' command
//!
//! The merge command deep-merges JSON documents read from disk.

use serde_json::json;
use shared_config::merge::{into_mapping, merge_layers};
use test_utils::{ConfigValue, TestContext};

#[test]
fn test_merge_documents_from_disk() {
    let ctx = TestContext::new();
    ctx.create_json("base.json", &json!({"Theme": "Light", "Sound": {"Volume": 50, "Muted": false}}));
    ctx.create_json("shared.json", &json!({"Sound": {"Volume": 30}}));
    ctx.create_json("machine.json", &json!({"Theme": "Dark", "Sound": {"Muted": true}}));

    let base = into_mapping(ctx.read_json("base.json").unwrap(), "base").unwrap();
    let layers: Vec<_> = ["shared.json", "machine.json"]
        .iter()
        .map(|name| into_mapping(ctx.read_json(name).unwrap(), name).unwrap())
        .collect();

    let merged = merge_layers(&base, &layers);

    assert_eq!(
        ConfigValue::Object(merged),
        json!({"Theme": "Dark", "Sound": {"Volume": 30, "Muted": true}})
    );
}

#[test]
fn test_merge_rejects_top_level_sequence() {
    let ctx = TestContext::new();
    ctx.create_json("list.json", &json!([1, 2, 3]));

    let err = into_mapping(ctx.read_json("list.json").unwrap(), "list.json").unwrap_err();
    assert!(err.to_string().contains("got sequence"));
}
