//! Configuration module
//!
//! Loads and validates style generator configuration files: which sources
//! to scan for class usage, which theme tokens to extend, which plugins to
//! load.

pub mod color;
pub mod loader;
pub mod schema;
pub mod structure;
pub mod validation;

use std::sync::Arc;

use crate::error::ConfigError;

pub use color::{ColorError, CssColor, Rgba, parse_css_color};
pub use loader::{
    ConfigFormat, ConfigLimits, ConfigLoader, DEFAULT_FILE_NAMES, LoadResult, LoadWarning,
    LoaderOptions,
};
pub use schema::*;
pub use validation::{ValidationResult, Validator};

/// Loads the configuration from the conventional location in the current
/// directory, logging any warnings.
///
/// # Errors
///
/// Returns an error if no definition is found or it fails to load.
pub fn load() -> Result<Arc<StyleConfig>, ConfigError> {
    let result = ConfigLoader::with_defaults().load()?;
    for warning in &result.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }
    Ok(result.config)
}
