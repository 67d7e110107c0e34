//! Tests for layered configuration loading.

use super::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write JSON5 contents to a path, creating parent directories if needed.
fn write_json5(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("dir");
    }
    fs::write(path, contents).expect("write");
}

/// Verify that a minimal config parses with defaults.
#[test]
fn parse_minimal_config() {
    let config = RosterConfig::load_from_str("{}").expect("config");
    assert_eq!(config.ui.tick_ms, 250);
    assert_eq!(config.ui.event_buffer, 256);
    assert_eq!(config.image.max_bytes, None);
    assert!(
        config
            .image
            .accepted_extensions
            .contains(&"png".to_string())
    );
}

/// JSON5 comments and trailing commas are accepted.
#[test]
fn parse_json5_syntax() {
    let json5 = r#"{
        // keep the picker strict
        image: { accepted_extensions: ["png", "JPG"], max_bytes: 1024, },
    }"#;
    let config = RosterConfig::load_from_str(json5).expect("config");
    assert_eq!(config.image.accepted_extensions, vec!["png", "JPG"]);
    assert_eq!(config.image.max_bytes, Some(1024));
}

/// Reject unexpected top-level config keys.
#[test]
fn rejects_unknown_top_level_key() {
    let err = RosterConfig::load_from_str(r#"{ unexpected: true }"#).unwrap_err();
    assert!(format!("{err}").contains("unknown key"));
}

/// Reject unexpected nested keys with their full path.
#[test]
fn rejects_unknown_nested_key() {
    let err = RosterConfig::load_from_str(r#"{ ui: { theme: "dark" } }"#).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("ui.theme"), "{msg}");
}

/// Reject non-image extensions in the accepted list.
#[test]
fn rejects_unsupported_extension() {
    let err = RosterConfig::load_from_str(r#"{ image: { accepted_extensions: ["exe"] } }"#)
        .unwrap_err();
    assert!(format!("{err}").contains("image.accepted_extensions"));
}

/// Reject zero tick intervals.
#[test]
fn rejects_zero_tick() {
    let err = RosterConfig::load_from_str(r#"{ ui: { tick_ms: 0 } }"#).unwrap_err();
    assert!(format!("{err}").contains("ui.tick_ms"));
}

/// Later layers override earlier ones key by key.
#[test]
fn layered_config_prefers_runtime_over_cwd_over_user() {
    let temp = TempDir::new().expect("tmp");
    let root = temp.path();
    let cwd = root.join("work");
    fs::create_dir_all(&cwd).expect("cwd");

    let user_config = root.join("home").join(DEFAULT_CONFIG_FILE);
    write_json5(
        &user_config,
        "{ ui: { tick_ms: 100, mouse_scroll_lines: 5 }, image: { max_bytes: 10 } }",
    );
    write_json5(
        &cwd.join(DEFAULT_CONFIG_FILE),
        "{ ui: { tick_ms: 200 }, image: { max_bytes: 20 } }",
    );
    let runtime = root.join("runtime.json5");
    write_json5(&runtime, "{ image: { max_bytes: 30 } }");

    let mut options = LayeredConfigOptions::new(&cwd).with_runtime_path(&runtime);
    options.user_config_path = Some(user_config);
    let layered = RosterConfig::load_layered_with_options(options).expect("layered");

    assert_eq!(layered.config.ui.tick_ms, 200);
    assert_eq!(layered.config.ui.mouse_scroll_lines, 5);
    assert_eq!(layered.config.image.max_bytes, Some(30));
    let sources: Vec<_> = layered.layers.iter().map(|layer| layer.source).collect();
    assert_eq!(
        sources,
        vec![
            ConfigLayerSource::User,
            ConfigLayerSource::Cwd,
            ConfigLayerSource::Runtime
        ]
    );
}

/// Missing optional layers are skipped, missing runtime layers are errors.
#[test]
fn missing_layers() {
    let temp = TempDir::new().expect("tmp");
    let mut options = LayeredConfigOptions::new(temp.path());
    options.user_config_path = Some(temp.path().join("absent.json5"));
    let layered = RosterConfig::load_layered_with_options(options.clone()).expect("layered");
    assert!(layered.layers.is_empty());

    let options = options.with_runtime_path(temp.path().join("missing-runtime.json5"));
    let err = RosterConfig::load_layered_with_options(options).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFailed(_)));
}

/// A user layer that is also the cwd layer is only loaded once.
#[test]
fn duplicate_layer_paths_load_once() {
    let temp = TempDir::new().expect("tmp");
    let path = temp.path().join(DEFAULT_CONFIG_FILE);
    write_json5(&path, "{ ui: { event_buffer: 8 } }");
    let mut options = LayeredConfigOptions::new(temp.path());
    options.user_config_path = Some(path);

    let layered = RosterConfig::load_layered_with_options(options).expect("layered");
    assert_eq!(layered.layers.len(), 1);
    assert_eq!(layered.config.ui.event_buffer, 8);
}

/// Schema errors name the layer they came from.
#[test]
fn schema_errors_name_the_layer() {
    let temp = TempDir::new().expect("tmp");
    write_json5(
        &temp.path().join(DEFAULT_CONFIG_FILE),
        "{ ui: { tick_ms: \"fast\" } }",
    );
    let mut options = LayeredConfigOptions::new(temp.path());
    options.user_config_path = None;
    let err = RosterConfig::load_layered_with_options(options).unwrap_err();
    assert!(format!("{err}").contains("cwd("));
}
