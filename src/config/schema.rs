//! Configuration schema types
//!
//! The loader assembles these from the checked tree (see
//! `structure::into_config`), so every field here can assume the right
//! container shape. The serde derives serve serialization and direct
//! deserialization of untagged documents. Value-level rules live in
//! `validation`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::config::color::{ColorError, CssColor, parse_css_color};

// ============================================================================
// Top-Level Configuration
// ============================================================================

/// Root configuration document for a utility-class style generator.
///
/// Recognized keys are `content`, `theme` and `plugins`. Any other top-level
/// key is kept verbatim in [`StyleConfig::extra`] and written back on
/// serialization, so tool-specific extension points survive a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Glob patterns naming the files the generator scans for class usage.
    pub content: Vec<String>,

    /// Theme customization.
    #[serde(default, skip_serializing_if = "Theme::is_empty")]
    pub theme: Theme,

    /// Plugin references, opaque to this crate.
    #[serde(default)]
    pub plugins: Vec<Value>,

    /// Unrecognized top-level keys, in document order.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl StyleConfig {
    /// Creates a configuration scanning the given patterns, with no theme
    /// extensions and no plugins.
    #[must_use]
    pub fn new<I, S>(content: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            content: content.into_iter().map(Into::into).collect(),
            theme: Theme::default(),
            plugins: Vec::new(),
            extra: IndexMap::new(),
        }
    }

    /// Font fallback stack registered under `alias`, most preferred first.
    #[must_use]
    pub fn font_family(&self, alias: &str) -> Option<&[String]> {
        self.theme
            .extend
            .font_family
            .get(alias)
            .map(Vec::as_slice)
    }

    /// Raw color string registered under `name`.
    #[must_use]
    pub fn color(&self, name: &str) -> Option<&str> {
        self.theme.extend.colors.get(name).map(String::as_str)
    }

    /// Serializes the document back to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if a passthrough value cannot be represented.
    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Serializes the document to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if a passthrough value has no JSON form (for
    /// example a mapping with non-string keys).
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ============================================================================
// Theme
// ============================================================================

/// The `theme` section.
///
/// Only `extend` is interpreted. Direct overrides of base tokens (e.g.
/// `theme.screens`) pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Additive extensions merged into the base design tokens.
    #[serde(default, skip_serializing_if = "ThemeExtension::is_empty")]
    pub extend: ThemeExtension,

    /// Unrecognized theme keys.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Theme {
    /// Returns `true` if the theme carries nothing worth serializing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extend.is_empty() && self.extra.is_empty()
    }
}

/// The `theme.extend` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeExtension {
    /// Font alias to fallback stack (most preferred first, generic family last).
    #[serde(
        rename = "fontFamily",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub font_family: IndexMap<String, Vec<String>>,

    /// Color name to CSS color expression, kept as written.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub colors: IndexMap<String, String>,

    /// Unrecognized extension keys (`spacing`, `screens`, ...).
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ThemeExtension {
    /// Returns `true` if no extension is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.font_family.is_empty() && self.colors.is_empty() && self.extra.is_empty()
    }

    /// Parses every color value.
    ///
    /// After a successful load this cannot fail; it is fallible so that
    /// hand-built documents get the same checks.
    ///
    /// # Errors
    ///
    /// Returns the first color that does not parse.
    pub fn parsed_colors(&self) -> Result<IndexMap<&str, CssColor>, ColorError> {
        self.colors
            .iter()
            .map(|(name, value)| parse_css_color(value).map(|c| (name.as_str(), c)))
            .collect()
    }
}
