//! Configuration loader
//!
//! This module implements the configuration loading pipeline:
//! 1. Read the definition (size limit, UTF-8 BOM)
//! 2. Parse YAML or JSON into an untyped tree
//! 3. Structural check (fail fast with `ConfigError::Schema`)
//! 4. Deserialization to typed config
//! 5. Validation (collect all issues into `ConfigError::Validation`)
//! 6. Freeze with `Arc`

use crate::config::schema::StyleConfig;
use crate::config::structure::{check_structure, into_config};
use crate::config::validation::Validator;
use crate::error::{ConfigError, Severity};

use serde_yaml::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File names probed, in order, when no path is given.
pub const DEFAULT_FILE_NAMES: &[&str] = &["stylecfg.yaml", "stylecfg.yml", "stylecfg.json"];

/// Source name reported for in-memory definitions.
pub const INLINE_SOURCE: &str = "<inline>";

// ============================================================================
// Public API
// ============================================================================

/// Serialization format of a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    /// YAML (also accepts most JSON).
    #[default]
    Yaml,
    /// Strict JSON.
    Json,
}

impl ConfigFormat {
    /// Picks the format from a file extension; anything but `.json` is YAML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Options for the configuration loader.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Directory searched for [`DEFAULT_FILE_NAMES`] by [`ConfigLoader::load`].
    pub base_dir: PathBuf,

    /// Treat warnings as validation errors.
    pub strict: bool,

    /// Limits for configuration size.
    pub config_limits: ConfigLimits,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            strict: false,
            config_limits: ConfigLimits::default(),
        }
    }
}

/// Limits for configuration size to prevent resource exhaustion.
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    /// Maximum definition size in bytes.
    pub max_config_size: usize,

    /// Maximum number of `content` patterns.
    pub max_content_patterns: usize,

    /// Maximum number of `fontFamily` plus `colors` entries.
    pub max_theme_entries: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_config_size: env_or("STYLECFG_MAX_CONFIG_SIZE", 1024 * 1024),
            max_content_patterns: env_or("STYLECFG_MAX_CONTENT_PATTERNS", 1000),
            max_theme_entries: env_or("STYLECFG_MAX_THEME_ENTRIES", 10_000),
        }
    }
}

/// Result of loading a configuration.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: Arc<StyleConfig>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Configuration loader.
///
/// Handles the full pipeline from definition text to frozen `StyleConfig`.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a new configuration loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Returns the loader options.
    #[must_use]
    pub const fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Finds the definition at the conventional location.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] listing every candidate checked.
    pub fn locate(&self) -> Result<PathBuf, ConfigError> {
        let candidates: Vec<PathBuf> = DEFAULT_FILE_NAMES
            .iter()
            .map(|name| self.options.base_dir.join(name))
            .collect();

        candidates
            .iter()
            .find(|p| p.is_file())
            .cloned()
            .ok_or(ConfigError::NotFound {
                searched: candidates,
            })
    }

    /// Loads the definition from the conventional location.
    ///
    /// # Errors
    ///
    /// Returns an error if no definition exists or it fails to load (see
    /// [`ConfigLoader::load_from_path`]).
    pub fn load(&self) -> Result<LoadResult, ConfigError> {
        let path = self.locate()?;
        self.load_from_path(&path)
    }

    /// Loads a definition file; the format follows the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read or exceeds the size limit
    /// - Parsing fails
    /// - A required key is missing or has the wrong shape (`Schema`)
    /// - A value violates its constraint (`Validation`)
    pub fn load_from_path(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let missing = || ConfigError::MissingFile {
            path: path.to_path_buf(),
        };

        let metadata = std::fs::metadata(path).map_err(|_| missing())?;
        let limit = self.options.config_limits.max_config_size;
        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > limit {
            return Err(ConfigError::TooLarge {
                size: file_size,
                limit,
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => ConfigError::Parse {
                source_name: path.display().to_string(),
                line: None,
                message: "configuration is not valid UTF-8".to_string(),
            },
            _ => missing(),
        })?;
        tracing::debug!(file = %path.display(), bytes = raw.len(), "read configuration");

        self.load_text(&raw, ConfigFormat::from_path(path), &path.display().to_string())
    }

    /// Loads an in-memory definition.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigLoader::load_from_path`], minus file access.
    pub fn load_from_str(&self, text: &str, format: ConfigFormat) -> Result<LoadResult, ConfigError> {
        let limit = self.options.config_limits.max_config_size;
        if text.len() > limit {
            return Err(ConfigError::TooLarge {
                size: text.len(),
                limit,
            });
        }
        self.load_text(text, format, INLINE_SOURCE)
    }

    fn load_text(
        &self,
        raw: &str,
        format: ConfigFormat,
        source_name: &str,
    ) -> Result<LoadResult, ConfigError> {
        // Handle UTF-8 BOM
        let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

        // Stage 2: parse
        let mut root = parse(text, format, source_name)?;
        if root.is_null() {
            return Err(ConfigError::Parse {
                source_name: source_name.to_string(),
                line: None,
                message: "configuration is empty".to_string(),
            });
        }

        // Stage 3: structure
        check_structure(&mut root)?;
        tracing::debug!(source = source_name, "structure check passed");

        // Stage 4: typed config
        let config = into_config(root)?;

        // Stage 5: validation
        let mut validator = Validator::new();
        let mut result = validator.validate(&config, &self.options.config_limits);

        if self.options.strict {
            result.errors.extend(result.warnings.drain(..).map(|mut issue| {
                issue.severity = Severity::Error;
                issue
            }));
        }

        if result.has_errors() {
            return Err(ConfigError::Validation {
                source_name: source_name.to_string(),
                issues: result.errors,
            });
        }

        let warnings: Vec<LoadWarning> = result
            .warnings
            .into_iter()
            .map(|issue| LoadWarning {
                message: issue.message,
                location: Some(issue.path),
            })
            .collect();

        tracing::debug!(
            source = source_name,
            patterns = config.content.len(),
            fonts = config.theme.extend.font_family.len(),
            colors = config.theme.extend.colors.len(),
            plugins = config.plugins.len(),
            warnings = warnings.len(),
            "configuration loaded"
        );

        // Stage 6: freeze
        Ok(LoadResult {
            config: Arc::new(config),
            warnings,
        })
    }
}

/// Parses definition text into an untyped tree.
///
/// Both formats go through `serde_yaml::Value`, whose mapping visitor
/// rejects duplicate keys.
fn parse(text: &str, format: ConfigFormat, source_name: &str) -> Result<Value, ConfigError> {
    let parse_error = |line: Option<usize>, message: String| ConfigError::Parse {
        source_name: source_name.to_string(),
        line,
        message,
    };

    if text.trim().is_empty() {
        return Err(parse_error(None, "configuration is empty".to_string()));
    }

    match format {
        ConfigFormat::Yaml => serde_yaml::from_str(text)
            .map_err(|e| parse_error(e.location().map(|l| l.line()), e.to_string())),
        ConfigFormat::Json => {
            serde_json::from_str(text).map_err(|e| parse_error(Some(e.line()), e.to_string()))
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = r#"
content:
  - ./_drafts/**/*.html
  - ./_includes/**/*.html
  - ./_layouts/**/*.html
  - ./_posts/*.md
  - ./*.md
  - ./*.html
theme:
  extend:
    fontFamily:
      plex: ["IBM Plex Mono", "monospace"]
    colors:
      light-green: "rgb(251, 254, 251)"
plugins: []
"#;

    fn load_yaml(yaml: &str) -> Result<LoadResult, ConfigError> {
        ConfigLoader::with_defaults().load_from_str(yaml, ConfigFormat::Yaml)
    }

    #[test]
    fn test_load_reference_config() {
        let result = load_yaml(REFERENCE).unwrap();
        let config = &result.config;
        assert_eq!(config.content.len(), 6);
        assert_eq!(config.content[0], "./_drafts/**/*.html");
        assert_eq!(config.content[5], "./*.html");
        assert_eq!(
            config.font_family("plex"),
            Some(&["IBM Plex Mono".to_string(), "monospace".to_string()][..])
        );
        assert_eq!(config.color("light-green"), Some("rgb(251, 254, 251)"));
        assert!(config.plugins.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_load_json() {
        let json = r##"{
            "content": ["./*.md"],
            "theme": {"extend": {"colors": {"brand": "#0af"}}},
            "plugins": ["@tailwindcss/forms"]
        }"##;
        let result = ConfigLoader::with_defaults()
            .load_from_str(json, ConfigFormat::Json)
            .unwrap();
        assert_eq!(result.config.color("brand"), Some("#0af"));
        assert_eq!(
            result.config.plugins,
            vec![Value::String("@tailwindcss/forms".to_string())]
        );
    }

    #[test]
    fn test_missing_content_is_schema_error() {
        let err = load_yaml("plugins: []").unwrap_err();
        assert!(err.is_schema(), "{err:?}");
        assert_eq!(err.field_path(), Some("content"));
    }

    #[test]
    fn test_empty_content_is_validation_error() {
        let err = load_yaml("content: []").unwrap_err();
        assert!(err.is_validation(), "{err:?}");
        assert_eq!(err.field_path(), Some("content"));
    }

    #[test]
    fn test_empty_document() {
        for text in ["", "   \n", "~", "\u{feff}"] {
            let err = load_yaml(text).unwrap_err();
            assert!(
                matches!(&err, ConfigError::Parse { message, .. } if message.contains("empty")),
                "{text:?}: {err:?}"
            );
        }
    }

    #[test]
    fn test_bom_is_stripped() {
        let result = load_yaml("\u{feff}content: ['./*.md']").unwrap();
        assert_eq!(result.config.content, ["./*.md"]);
    }

    #[test]
    fn test_yaml_syntax_error_has_line() {
        let err = load_yaml("content:\n  - a\n bad: [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { line: Some(_), .. }), "{err:?}");
    }

    #[test]
    fn test_duplicate_color_keys_rejected() {
        let yaml = "content: [a]\ntheme:\n  extend:\n    colors:\n      ink: black\n      ink: white\n";
        let err = load_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn test_duplicate_json_keys_rejected() {
        let json = r#"{"content": ["a"], "theme": {"extend": {"colors": {"x": "red", "x": "blue"}}}}"#;
        let err = ConfigLoader::with_defaults()
            .load_from_str(json, ConfigFormat::Json)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let yaml = "content: [a]\ndarkMode: class\nprefix: tw-\ntheme:\n  screens:\n    sm: 640px\n";
        let result = load_yaml(yaml).unwrap();
        let config = &result.config;
        assert_eq!(
            config.extra.keys().collect::<Vec<_>>(),
            ["darkMode", "prefix"]
        );
        assert!(config.theme.extra.contains_key("screens"));
    }

    #[test]
    fn test_tagged_passthrough_value_round_trips() {
        let result = load_yaml("content: [a]\ndarkMode: !custom class\n").unwrap();
        let config = &result.config;
        match config.extra.get("darkMode") {
            Some(Value::Tagged(tagged)) => {
                assert_eq!(tagged.tag, "custom");
                assert_eq!(tagged.value, Value::String("class".to_string()));
            }
            other => panic!("expected tagged value, got {other:?}"),
        }

        let yaml = config.to_yaml_string().unwrap();
        assert!(yaml.contains("darkMode: !custom class"), "{yaml}");
        let reloaded = load_yaml(&yaml).unwrap();
        assert_eq!(reloaded.config, result.config);
    }

    #[test]
    fn test_non_utf8_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.yaml");
        std::fs::write(&path, b"content: [\"\xff\xfe\"]\n").unwrap();

        let err = ConfigLoader::with_defaults().load_from_path(&path).unwrap_err();
        assert!(
            matches!(&err, ConfigError::Parse { message, .. } if message.contains("UTF-8")),
            "{err:?}"
        );
        assert_eq!(
            crate::error::StyleCfgError::from(err).exit_code(),
            crate::error::ExitCode::CONFIG_ERROR
        );
    }

    #[test]
    fn test_warnings_are_returned() {
        let yaml = "content: [a, a]\ncontents: [b]\n";
        let result = load_yaml(yaml).unwrap();
        let locations: Vec<_> = result
            .warnings
            .iter()
            .map(|w| w.location.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(locations, ["content[1]", "contents"]);
    }

    #[test]
    fn test_strict_mode_promotes_warnings() {
        let loader = ConfigLoader::new(LoaderOptions {
            strict: true,
            ..LoaderOptions::default()
        });
        let err = loader
            .load_from_str("content: [a, a]", ConfigFormat::Yaml)
            .unwrap_err();
        match err {
            ConfigError::Validation { issues, .. } => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].severity, Severity::Error);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_size_limit() {
        let loader = ConfigLoader::new(LoaderOptions {
            config_limits: ConfigLimits {
                max_config_size: 8,
                ..ConfigLimits::default()
            },
            ..LoaderOptions::default()
        });
        let err = loader
            .load_from_str("content: ['./*.md']", ConfigFormat::Yaml)
            .unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge { limit: 8, .. }));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("a.JSON")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("a.yml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("noext")), ConfigFormat::Yaml);
    }

    #[test]
    fn test_load_from_path_missing() {
        let err = ConfigLoader::with_defaults()
            .load_from_path(Path::new("/nonexistent/stylecfg.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn test_load_from_conventional_location() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("stylecfg.json"), r#"{"content": ["./*.md"]}"#).unwrap();

        let loader = ConfigLoader::new(LoaderOptions {
            base_dir: dir.path().to_path_buf(),
            ..LoaderOptions::default()
        });
        assert_eq!(loader.locate().unwrap(), dir.path().join("stylecfg.json"));
        let result = loader.load().unwrap();
        assert_eq!(result.config.content, ["./*.md"]);

        // YAML takes precedence over JSON
        std::fs::write(dir.path().join("stylecfg.yaml"), "content: ['./*.html']").unwrap();
        let result = loader.load().unwrap();
        assert_eq!(result.config.content, ["./*.html"]);
    }

    #[test]
    fn test_load_not_found_lists_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new(LoaderOptions {
            base_dir: dir.path().to_path_buf(),
            ..LoaderOptions::default()
        });
        match loader.load().unwrap_err() {
            ConfigError::NotFound { searched } => assert_eq!(searched.len(), 3),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
