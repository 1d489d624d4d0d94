//! Configuration parsing tests

use std::collections::HashMap;

use rowfuse_core::buffer::OVER_ALLOCATE_SIZE;
use rowfuse_core::config::{DuplicatePolicy, FuseConfig, MissingFieldPolicy, SelectionPolicy};
use rowfuse_core::error::Error;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let cfg = FuseConfig::default();
    assert_eq!(cfg.slack, OVER_ALLOCATE_SIZE);
    assert_eq!(cfg.selection, SelectionPolicy::UseFirst);
    assert_eq!(cfg.duplicates, DuplicatePolicy::Prevent);
    assert_eq!(cfg.missing_field, MissingFieldPolicy::Null);
    assert_eq!(cfg.row_buffer().slack(), OVER_ALLOCATE_SIZE);
}

#[test]
fn test_from_lookup_overrides() {
    let cfg = FuseConfig::from_lookup(lookup(&[
        ("ROWFUSE_SLACK", "4"),
        ("ROWFUSE_SELECTION", "use_last_not_null"),
        ("ROWFUSE_DUPLICATES", "Rename"),
        ("ROWFUSE_MISSING_FIELD", "fail"),
    ]))
    .unwrap();
    assert_eq!(cfg.slack, 4);
    assert_eq!(cfg.selection, SelectionPolicy::UseLastNotNull);
    assert_eq!(cfg.duplicates, DuplicatePolicy::Rename);
    assert_eq!(cfg.missing_field, MissingFieldPolicy::Fail);
}

#[test]
fn test_from_lookup_rejects_garbage() {
    let err = FuseConfig::from_lookup(lookup(&[("ROWFUSE_SLACK", "lots")])).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.suggestions().iter().any(|s| s.contains("ROWFUSE_SLACK")));

    let err = FuseConfig::from_lookup(lookup(&[("ROWFUSE_SELECTION", "middle")])).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_from_json_partial() {
    let cfg = FuseConfig::from_json(r#"{"selection": "use_first_not_null", "slack": 0}"#).unwrap();
    assert_eq!(cfg.selection, SelectionPolicy::UseFirstNotNull);
    assert_eq!(cfg.slack, 0);
    assert_eq!(cfg.duplicates, DuplicatePolicy::Prevent);
}

#[test]
fn test_from_json_validates() {
    let err = FuseConfig::from_json(r#"{"slack": 10000000}"#).unwrap_err();
    assert!(matches!(err, Error::Config(_)));

    let err = FuseConfig::from_json(r#"{"duplicates": "merge"}"#).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_json_roundtrip_uses_snake_case() {
    let cfg = FuseConfig {
        selection: SelectionPolicy::UseLast,
        ..FuseConfig::default()
    };
    let json = serde_json::to_value(&cfg).unwrap();
    assert_eq!(json["selection"], "use_last");
    assert_eq!(json["missing_field"], "null");
}
