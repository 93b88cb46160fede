//! Configuration validation
//!
//! Value-level checks on a structurally sound `StyleConfig`. Validation
//! collects ALL issues (doesn't stop at the first) so a user can fix a
//! definition in one pass.

use std::collections::HashMap;

use crate::config::color::parse_css_color;
use crate::config::loader::ConfigLimits;
use crate::config::schema::{StyleConfig, ThemeExtension};
use crate::error::{Severity, ValidationIssue};

/// CSS generic font families, valid as the last entry of a font stack.
pub const GENERIC_FONT_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "ui-monospace",
    "ui-rounded",
    "emoji",
    "math",
    "fangsong",
];

const TOP_LEVEL_KEYS: &[&str] = &["content", "theme", "plugins"];
const THEME_KEYS: &[&str] = &["extend"];
const EXTEND_KEYS: &[&str] = &["fontFamily", "colors"];

// ============================================================================
// Public API
// ============================================================================

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Configuration validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a configuration and returns every error and warning found.
    pub fn validate(&mut self, config: &StyleConfig, limits: &ConfigLimits) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_content(&config.content);
        self.validate_font_families(&config.theme.extend);
        self.validate_colors(&config.theme.extend);
        self.validate_unknown_keys(config);
        self.validate_limits(config, limits);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    // ========================================================================
    // Content
    // ========================================================================

    fn validate_content(&mut self, content: &[String]) {
        if content.is_empty() {
            self.add_error(
                "content",
                "At least one content pattern is required; nothing would be scanned",
            );
            return;
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (i, pattern) in content.iter().enumerate() {
            let path = format!("content[{i}]");
            let trimmed = pattern.trim();

            if trimmed.is_empty() {
                self.add_error(&path, "Content pattern must not be empty");
                continue;
            }

            if let Err(e) = glob::Pattern::new(trimmed) {
                self.add_error(&path, &format!("Invalid glob pattern '{pattern}': {e}"));
                continue;
            }

            if let Some(first) = seen.get(trimmed) {
                self.add_warning(
                    &path,
                    &format!("Duplicate content pattern '{trimmed}' (first at content[{first}])"),
                );
            } else {
                seen.insert(trimmed, i);
            }
        }
    }

    // ========================================================================
    // Theme Extensions
    // ========================================================================

    fn validate_font_families(&mut self, extend: &ThemeExtension) {
        const BASE: &str = "theme.extend.fontFamily";

        for (alias, stack) in &extend.font_family {
            let path = format!("{BASE}.{alias}");

            if alias.trim().is_empty() {
                self.add_error(BASE, "Font alias must not be empty");
            }

            if stack.is_empty() {
                self.add_error(&path, "Font stack must list at least one font");
                continue;
            }

            let mut has_blank = false;
            for (i, name) in stack.iter().enumerate() {
                if name.trim().is_empty() {
                    self.add_error(&format!("{path}[{i}]"), "Font name must not be empty");
                    has_blank = true;
                }
            }

            let last = &stack[stack.len() - 1];
            if !has_blank && !is_generic_family(last) {
                self.add_warning(
                    &path,
                    &format!(
                        "Font stack ends with '{last}' rather than a generic family \
                         (e.g. 'sans-serif', 'monospace')"
                    ),
                );
            }
        }
    }

    fn validate_colors(&mut self, extend: &ThemeExtension) {
        const BASE: &str = "theme.extend.colors";

        for (name, value) in &extend.colors {
            if name.trim().is_empty() {
                self.add_error(BASE, "Color name must not be empty");
                continue;
            }

            if let Err(e) = parse_css_color(value) {
                self.add_error(
                    &format!("{BASE}.{name}"),
                    &format!("Invalid color '{value}': {e}"),
                );
            }
        }
    }

    // ========================================================================
    // Passthrough Keys
    // ========================================================================

    /// Unknown keys are kept, but a near-miss of a recognized key is almost
    /// always a typo that silently drops the section.
    fn validate_unknown_keys(&mut self, config: &StyleConfig) {
        self.check_near_misses("", config.extra.keys(), TOP_LEVEL_KEYS);
        self.check_near_misses("theme.", config.theme.extra.keys(), THEME_KEYS);
        self.check_near_misses(
            "theme.extend.",
            config.theme.extend.extra.keys(),
            EXTEND_KEYS,
        );
    }

    fn check_near_misses<'a>(
        &mut self,
        prefix: &str,
        keys: impl Iterator<Item = &'a String>,
        known: &[&str],
    ) {
        for key in keys {
            if let Some(suggestion) = suggest_key(key, known) {
                self.add_warning(
                    &format!("{prefix}{key}"),
                    &format!("Unknown key '{key}' (did you mean '{suggestion}'?)"),
                );
            }
        }
    }

    // ========================================================================
    // Limits
    // ========================================================================

    fn validate_limits(&mut self, config: &StyleConfig, limits: &ConfigLimits) {
        if config.content.len() > limits.max_content_patterns {
            self.add_error(
                "content",
                &format!(
                    "Too many content patterns: {} (maximum: {}). \
                     Set STYLECFG_MAX_CONTENT_PATTERNS to increase the limit.",
                    config.content.len(),
                    limits.max_content_patterns
                ),
            );
        }

        let extend = &config.theme.extend;
        let entries = extend.font_family.len() + extend.colors.len();
        if entries > limits.max_theme_entries {
            self.add_error(
                "theme.extend",
                &format!(
                    "Too many theme entries: {entries} (maximum: {}). \
                     Set STYLECFG_MAX_THEME_ENTRIES to increase the limit.",
                    limits.max_theme_entries
                ),
            );
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Adds an error to the collection.
    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    /// Adds a warning to the collection.
    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Returns `true` for a CSS generic font family keyword.
#[must_use]
pub fn is_generic_family(name: &str) -> bool {
    let name = name.trim();
    GENERIC_FONT_FAMILIES
        .iter()
        .any(|g| g.eq_ignore_ascii_case(name))
}

/// Suggests a recognized key for a near-miss.
///
/// Returns the closest match if its Damerau-Levenshtein distance is ≤ 2
/// and the key is not already exact.
fn suggest_key(key: &str, known: &[&str]) -> Option<String> {
    known
        .iter()
        .map(|k| (*k, strsim::damerau_levenshtein(key, k)))
        .filter(|(_, dist)| (1..=2).contains(dist))
        .min_by_key(|(_, dist)| *dist)
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Tests
// ============================================================================
