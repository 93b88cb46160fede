use proptest::prelude::*;

use stylecfg::config::{ConfigFormat, ConfigLoader, StyleConfig};
use stylecfg::error::ConfigError;

fn load(text: &str, format: ConfigFormat) -> Result<std::sync::Arc<StyleConfig>, ConfigError> {
    ConfigLoader::with_defaults()
        .load_from_str(text, format)
        .map(|r| r.config)
}

fn with_color(value: &str) -> String {
    format!("content: ['./*.md']\ntheme:\n  extend:\n    colors:\n      c: \"{value}\"\n")
}

#[test]
fn concrete_scenario() {
    let yaml = r#"
content: ["./*.md"]
theme:
  extend:
    fontFamily:
      plex: ["IBM Plex Mono", "monospace"]
    colors:
      light-green: "rgb(251, 254, 251)"
plugins: []
"#;
    let config = load(yaml, ConfigFormat::Yaml).unwrap();
    assert_eq!(config.content, ["./*.md"]);
    assert_eq!(config.theme.extend.font_family.len(), 1);
    assert_eq!(
        config.font_family("plex"),
        Some(&["IBM Plex Mono".to_string(), "monospace".to_string()][..])
    );
    assert_eq!(config.theme.extend.colors.len(), 1);
    assert_eq!(config.color("light-green"), Some("rgb(251, 254, 251)"));
    assert!(config.plugins.is_empty());
}

#[test]
fn yaml_and_json_fixtures_agree() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let loader = ConfigLoader::with_defaults();
    let yaml = loader.load_from_path(&dir.join("reference.yaml")).unwrap();
    let json = loader.load_from_path(&dir.join("reference.json")).unwrap();
    assert_eq!(yaml.config, json.config);
}

#[test]
fn missing_content_references_path() {
    let err = load("theme: {}\n", ConfigFormat::Yaml).unwrap_err();
    assert!(
        matches!(&err, ConfigError::Schema { path, .. } if path == "content"),
        "{err:?}"
    );
}

#[test]
fn empty_content_is_validation_error() {
    let err = load(r#"{"content": []}"#, ConfigFormat::Json).unwrap_err();
    assert!(err.is_validation(), "{err:?}");
}

#[test]
fn passthrough_survives_round_trip() {
    let yaml = "content: [a]\ndarkMode: class\ncorePlugins:\n  preflight: false\n";
    let config = load(yaml, ConfigFormat::Yaml).unwrap();
    let reloaded = load(&config.to_yaml_string().unwrap(), ConfigFormat::Yaml).unwrap();
    assert_eq!(config, reloaded);
    assert!(reloaded.extra.contains_key("corePlugins"));
}

#[test]
fn loaded_config_is_shareable_across_threads() {
    let config = load("content: ['./*.html']", ConfigFormat::Yaml).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let config = std::sync::Arc::clone(&config);
            std::thread::spawn(move || config.content.len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
}

// ============================================================================
// Properties
// ============================================================================

fn pattern() -> impl Strategy<Value = String> {
    ("[a-z_]{1,8}", prop_oneof!["html", "md", "js", "vue"])
        .prop_map(|(dir, ext)| format!("./{dir}/**/*.{ext}"))
}

fn font_stack() -> impl Strategy<Value = Vec<String>> {
    (
        prop::collection::vec("[A-Z][a-z]{2,8}( [A-Z][a-z]{2,8})?", 0..3),
        prop_oneof!["serif", "sans-serif", "monospace"],
    )
        .prop_map(|(mut names, generic)| {
            names.push(generic.to_string());
            names
        })
}

fn color() -> impl Strategy<Value = String> {
    prop_oneof![
        (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| format!("rgb({r}, {g}, {b})")),
        "#[0-9a-f]{6}",
        "#[0-9a-f]{3}",
        prop_oneof!["black", "white", "rebeccapurple", "transparent"].prop_map(String::from),
    ]
}

fn document() -> impl Strategy<Value = StyleConfig> {
    (
        prop::collection::vec(pattern(), 1..6),
        prop::collection::vec(("[a-z]{1,6}", font_stack()), 0..4),
        prop::collection::vec(("[a-z]{1,6}(-[a-z]{1,6})?", color()), 0..6),
        prop::collection::vec("[a-z@/-]{1,12}", 0..3),
    )
        .prop_map(|(content, fonts, colors, plugins)| {
            let mut config = StyleConfig::new(content);
            config.theme.extend.font_family.extend(fonts);
            config.theme.extend.colors.extend(colors);
            config.plugins = plugins.into_iter().map(serde_yaml::Value::String).collect();
            config
        })
}

proptest! {
    #[test]
    fn rgb_in_range_is_accepted(r in 0u16..=255, g in 0u16..=255, b in 0u16..=255) {
        let config = load(&with_color(&format!("rgb({r}, {g}, {b})")), ConfigFormat::Yaml);
        prop_assert!(config.is_ok(), "{:?}", config.err());
    }

    #[test]
    fn rgb_out_of_range_is_rejected(bad in 256u16..10_000, slot in 0usize..3) {
        let mut channels = [0u16; 3];
        channels[slot] = bad;
        let value = format!("rgb({}, {}, {})", channels[0], channels[1], channels[2]);
        let err = load(&with_color(&value), ConfigFormat::Yaml).unwrap_err();
        prop_assert!(err.is_validation(), "{:?}", err);
        prop_assert_eq!(err.field_path(), Some("theme.extend.colors.c"));
    }

    #[test]
    fn rgb_non_numeric_is_rejected(word in "[a-z]{1,6}", slot in 0usize..3) {
        let mut channels = vec!["0".to_string(); 3];
        channels[slot] = word;
        let value = format!("rgb({})", channels.join(", "));
        let err = load(&with_color(&value), ConfigFormat::Yaml).unwrap_err();
        prop_assert!(err.is_validation(), "{:?}", err);
    }

    #[test]
    fn content_order_is_preserved(patterns in prop::collection::vec(pattern(), 1..8)) {
        let json = serde_json::json!({ "content": &patterns }).to_string();
        let config = load(&json, ConfigFormat::Json).unwrap();
        prop_assert_eq!(&config.content, &patterns);
    }

    #[test]
    fn yaml_round_trip_is_identity(doc in document()) {
        let first = load(&doc.to_yaml_string().unwrap(), ConfigFormat::Yaml).unwrap();
        prop_assert_eq!(&*first, &doc);
        let second = load(&first.to_yaml_string().unwrap(), ConfigFormat::Yaml).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn json_round_trip_is_identity(doc in document()) {
        let first = load(&doc.to_json_string().unwrap(), ConfigFormat::Json).unwrap();
        prop_assert_eq!(&*first, &doc);
    }
}

#[test]
fn load_reads_conventional_file_in_working_directory() {
    // cargo runs integration tests from the package root, which ships stylecfg.yaml
    let config = stylecfg::load().unwrap();
    assert_eq!(config.content.len(), 6);
    assert_eq!(config.color("light-green"), Some("rgb(251, 254, 251)"));
}
