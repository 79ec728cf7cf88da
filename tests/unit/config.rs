use super::*;
use serde_json::json;

#[test]
fn defaults_are_valid() {
    let cfg = Config::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.network.colors.len(), 21);
    assert_eq!(cfg.network.colors[0], ColorDef::rgba(0.0, 0.0, 0.0, 1.0));
    assert_eq!(cfg.cell, CellSize { h: 25.0, v: 25.0 });
    assert_eq!(cfg.x_axis_height(), 40.0);
    assert_eq!(cfg.y_axis_width(), 120.0);
    assert_eq!(cfg.lang.short_months.len(), 12);
    assert!(cfg.title.font.is_bold());
    assert!(cfg.title.font.is_italic());
    assert!(!cfg.network.labels.font.is_bold());
}

#[test]
fn nested_overrides_keep_sibling_defaults() {
    let cfg = Config::from_overrides(&json!({
        "network": {"pointRadius": 5, "labels": {"padding": 2}},
        "xAxis": {"enabled": false}
    }))
    .unwrap();
    assert_eq!(cfg.network.point_radius, 5.0);
    assert_eq!(cfg.network.line_width, 2.0);
    assert_eq!(cfg.network.labels.padding, 2.0);
    assert_eq!(cfg.network.labels.arrow_size, 8.0);
    assert_eq!(cfg.x_axis_height(), 0.0);
    assert_eq!(cfg.x_axis.height, 40.0);
}

#[test]
fn arrays_replace_rather_than_merge() {
    let cfg = Config::from_overrides(&json!({
        "network": {"colors": ["#111111", "#222222"]}
    }))
    .unwrap();
    assert_eq!(cfg.network.colors.len(), 2);
}

#[test]
fn legacy_keys_are_accepted() {
    let cfg = Config::from_overrides(&json!({
        "space": {"h": 10, "v": 12},
        "onlyMe": true
    }))
    .unwrap();
    assert_eq!(cfg.cell, CellSize { h: 10.0, v: 12.0 });
    assert!(cfg.only_primary_contributor);
}

#[test]
fn validation_rejects_bad_values() {
    let err = Config::from_overrides(&json!({"network": {"colors": ["#000"]}})).unwrap_err();
    assert!(matches!(err, GitnetError::Validation(_)));
    assert!(Config::from_overrides(&json!({"cell": {"h": 0, "v": 25}})).is_err());
    assert!(Config::from_overrides(&json!({"network": {"lineWidth": -1}})).is_err());
    assert!(Config::from_overrides(&json!({"grid": {"background": []}})).is_err());
}

#[test]
fn malformed_overrides_are_serde_errors() {
    let err = Config::from_overrides(&json!({"cell": {"h": "wide"}})).unwrap_err();
    assert!(matches!(err, GitnetError::Serde(_)));
}

#[test]
fn network_affecting_changes_are_detected() {
    let base = Config::default();
    let moved = base.merged(&json!({"title": {"text": "Graph"}})).unwrap();
    assert!(!base.affects_network(&moved));
    let thicker = base.merged(&json!({"network": {"lineWidth": 3}})).unwrap();
    assert!(base.affects_network(&thicker));
}

#[test]
fn merge_json_inserts_missing_keys() {
    let mut base = json!({"a": {"b": 1}});
    merge_json(&mut base, &json!({"a": {"c": 2}, "d": [1]}));
    assert_eq!(base, json!({"a": {"b": 1, "c": 2}, "d": [1]}));
}

#[test]
fn repository_names_the_title() {
    let cfg = Config::from_overrides(&json!({ "repository": "octo/hello-world" })).unwrap();
    assert_eq!(cfg.title.text, "hello-world");

    let cfg = Config::from_overrides(&json!({
        "repository": "octo/hello-world",
        "title": { "text": "Forks" }
    }))
    .unwrap();
    assert_eq!(cfg.title.text, "Forks");

    // later unrelated overrides keep a custom title
    let cfg = cfg.merged(&json!({ "autoResize": true })).unwrap();
    assert_eq!(cfg.title.text, "Forks");

    let cfg = Config::from_overrides(&json!({ "repository": "no-slash" })).unwrap();
    assert_eq!(cfg.title.text, "Network");
}
