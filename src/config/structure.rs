//! Structural checks on the untyped definition tree.
//!
//! Runs between parsing and typed deserialization. It fails fast with
//! [`ConfigError::Schema`] on the first missing required key or wrong
//! container type, and normalizes two lenient forms in place:
//! - `null` for an optional section becomes an empty container
//! - a `fontFamily` value given as a single string becomes a one-element list
//!
//! [`into_config`] then builds the typed document from the checked tree.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use crate::config::schema::{StyleConfig, Theme, ThemeExtension};
use crate::error::ConfigError;

/// Path used for errors about the document root itself.
pub const ROOT_PATH: &str = "<root>";

/// Checks container shapes and normalizes lenient forms.
///
/// # Errors
///
/// Returns [`ConfigError::Schema`] naming the first offending path.
pub fn check_structure(root: &mut Value) -> Result<(), ConfigError> {
    let map = as_mapping_mut(root, ROOT_PATH, "a mapping at the top level")?;
    require_string_keys(map, ROOT_PATH)?;

    check_content(map)?;

    if let Some(theme) = optional_section(map, "theme", Value::Mapping(Mapping::new())) {
        check_theme(theme)?;
    }

    if let Some(plugins) = optional_section(map, "plugins", Value::Sequence(Vec::new())) {
        if !plugins.is_sequence() {
            return Err(schema("plugins", "a sequence of plugin references", plugins));
        }
    }

    Ok(())
}

fn check_content(map: &Mapping) -> Result<(), ConfigError> {
    let Some(content) = map.get("content") else {
        return Err(ConfigError::Schema {
            path: "content".to_string(),
            reason: "required key is missing".to_string(),
        });
    };

    let Value::Sequence(patterns) = content else {
        return Err(schema("content", "a sequence of glob patterns", content));
    };

    for (i, pattern) in patterns.iter().enumerate() {
        if !pattern.is_string() {
            return Err(schema(&format!("content[{i}]"), "a string", pattern));
        }
    }
    Ok(())
}

fn check_theme(theme: &mut Value) -> Result<(), ConfigError> {
    let theme = as_mapping_mut(theme, "theme", "a mapping")?;
    require_string_keys(theme, "theme")?;

    let Some(extend) = optional_section(theme, "extend", Value::Mapping(Mapping::new())) else {
        return Ok(());
    };
    let extend = as_mapping_mut(extend, "theme.extend", "a mapping")?;
    require_string_keys(extend, "theme.extend")?;

    if let Some(fonts) = optional_section(extend, "fontFamily", Value::Mapping(Mapping::new())) {
        check_font_families(fonts)?;
    }

    if let Some(colors) = optional_section(extend, "colors", Value::Mapping(Mapping::new())) {
        check_colors(colors)?;
    }
    Ok(())
}

fn check_font_families(fonts: &mut Value) -> Result<(), ConfigError> {
    const BASE: &str = "theme.extend.fontFamily";

    let fonts = as_mapping_mut(fonts, BASE, "a mapping of font aliases")?;
    require_string_keys(fonts, BASE)?;

    for (alias, stack) in fonts.iter_mut() {
        let path = format!("{BASE}.{}", alias.as_str().unwrap_or_default());
        if let Value::String(single) = stack {
            let name = std::mem::take(single);
            *stack = Value::Sequence(vec![Value::String(name)]);
            continue;
        }
        match stack {
            Value::Sequence(names) => {
                for (i, name) in names.iter().enumerate() {
                    if !name.is_string() {
                        return Err(schema(&format!("{path}[{i}]"), "a font name string", name));
                    }
                }
            }
            other => {
                return Err(schema(&path, "a font name or a list of font names", other));
            }
        }
    }
    Ok(())
}

fn check_colors(colors: &Value) -> Result<(), ConfigError> {
    const BASE: &str = "theme.extend.colors";

    let Value::Mapping(colors) = colors else {
        return Err(schema(BASE, "a mapping of color names", colors));
    };
    require_string_keys(colors, BASE)?;

    for (name, value) in colors {
        if !value.is_string() {
            let path = format!("{BASE}.{}", name.as_str().unwrap_or_default());
            return Err(schema(&path, "a CSS color string", value));
        }
    }
    Ok(())
}

// ============================================================================
// Typed assembly
// ============================================================================

/// Builds the typed document from a tree that passed [`check_structure`].
///
/// Recognized keys are deserialized one by one. Every other key moves into
/// the matching passthrough map untouched, YAML tags included.
///
/// # Errors
///
/// Returns [`ConfigError::Schema`] if the tree was not checked first.
pub fn into_config(root: Value) -> Result<StyleConfig, ConfigError> {
    let mut map = into_mapping(root, ROOT_PATH)?;

    let content = take(&mut map, "content", "content")?;
    let plugins = take(&mut map, "plugins", "plugins")?;
    let theme = match map.shift_remove("theme") {
        Some(theme) => into_theme(theme)?,
        None => Theme::default(),
    };

    Ok(StyleConfig {
        content,
        theme,
        plugins,
        extra: passthrough(map, ROOT_PATH)?,
    })
}

fn into_theme(theme: Value) -> Result<Theme, ConfigError> {
    let mut theme = into_mapping(theme, "theme")?;

    let extend = match theme.shift_remove("extend") {
        Some(extend) => {
            let mut extend = into_mapping(extend, "theme.extend")?;
            ThemeExtension {
                font_family: take(&mut extend, "fontFamily", "theme.extend.fontFamily")?,
                colors: take(&mut extend, "colors", "theme.extend.colors")?,
                extra: passthrough(extend, "theme.extend")?,
            }
        }
        None => ThemeExtension::default(),
    };

    Ok(Theme {
        extend,
        extra: passthrough(theme, "theme")?,
    })
}

/// Removes `key` and deserializes it, or yields the default when absent.
fn take<T>(map: &mut Mapping, key: &str, path: &str) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Default,
{
    map.shift_remove(key).map_or_else(
        || Ok(T::default()),
        |value| {
            serde_yaml::from_value(value).map_err(|e| ConfigError::Schema {
                path: path.to_string(),
                reason: e.to_string(),
            })
        },
    )
}

fn passthrough(map: Mapping, path: &str) -> Result<IndexMap<String, Value>, ConfigError> {
    map.into_iter()
        .map(|(key, value)| match key {
            Value::String(key) => Ok((key, value)),
            other => Err(schema(path, "string keys", &other)),
        })
        .collect()
}

fn into_mapping(value: Value, path: &str) -> Result<Mapping, ConfigError> {
    match value {
        Value::Mapping(map) => Ok(map),
        other => Err(schema(path, "a mapping", &other)),
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Returns the section under `key`, replacing an explicit `null` with
/// `empty` first. `None` means the key is absent.
fn optional_section<'a>(map: &'a mut Mapping, key: &str, empty: Value) -> Option<&'a mut Value> {
    let value = map.get_mut(key)?;
    if value.is_null() {
        *value = empty;
    }
    Some(value)
}

fn as_mapping_mut<'a>(
    value: &'a mut Value,
    path: &str,
    expected: &str,
) -> Result<&'a mut Mapping, ConfigError> {
    match value {
        Value::Mapping(map) => Ok(map),
        other => Err(schema(path, expected, other)),
    }
}

fn require_string_keys(map: &Mapping, path: &str) -> Result<(), ConfigError> {
    match map.keys().find(|k| !k.is_string()) {
        Some(key) => Err(ConfigError::Schema {
            path: path.to_string(),
            reason: format!("keys must be strings, found {}", kind(key)),
        }),
        None => Ok(()),
    }
}

fn schema(path: &str, expected: &str, found: &Value) -> ConfigError {
    ConfigError::Schema {
        path: path.to_string(),
        reason: format!("expected {expected}, found {}", kind(found)),
    }
}

/// Human-readable name of a YAML node type.
#[must_use]
pub const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
