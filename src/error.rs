//! Error types for `stylecfg`
//!
//! Configuration failures come in two kinds: structural (`Schema`) and
//! value-level (`Validation`). The remaining variants cover reading and
//! parsing the definition before either check runs.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `stylecfg` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (parse, schema or validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `stylecfg` operations.
#[derive(Debug, Error)]
pub enum StyleCfgError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl StyleCfgError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(ConfigError::MissingFile { .. } | ConfigError::NotFound { .. })
            | Self::Io(_) => ExitCode::IO_ERROR,
            Self::Config(_) | Self::Json(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No definition exists at the conventional location
    #[error("no configuration found (looked for {})", display_paths(.searched))]
    NotFound {
        /// Candidate paths that were checked, in order
        searched: Vec<PathBuf>,
    },

    /// An explicitly named definition file does not exist or is unreadable
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// The definition exceeds the configured size limit
    #[error("configuration is {size} bytes (limit: {limit})")]
    TooLarge {
        /// Actual size in bytes
        size: usize,
        /// Configured limit in bytes
        limit: usize,
    },

    /// The definition is not well-formed YAML/JSON
    #[error("parse error in {source_name}: {message}")]
    Parse {
        /// File path, or `<inline>` for in-memory definitions
        source_name: String,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// A required key is absent or has the wrong container type
    #[error("schema error at '{path}': {reason}")]
    Schema {
        /// Field path (e.g. `theme.extend.colors`)
        path: String,
        /// What was expected
        reason: String,
    },

    /// One or more present fields violate a value constraint
    #[error("validation failed for {source_name}: {}", summarize(.issues))]
    Validation {
        /// File path, or `<inline>` for in-memory definitions
        source_name: String,
        /// Every issue found, in document order
        issues: Vec<ValidationIssue>,
    },
}

impl ConfigError {
    /// Field path of the first offending field, when the error has one.
    #[must_use]
    pub fn field_path(&self) -> Option<&str> {
        match self {
            Self::Schema { path, .. } => Some(path),
            Self::Validation { issues, .. } => issues.first().map(|i| i.path.as_str()),
            _ => None,
        }
    }

    /// Returns `true` for the structural error kind.
    #[must_use]
    pub const fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// Returns `true` for the value-level error kind.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn summarize(issues: &[ValidationIssue]) -> String {
    match issues {
        [] => "no issues recorded".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found during configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., `theme.extend.colors.brand`)
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - validation failure that prevents configuration from being used
    Error,
    /// Warning - potential issue that does not prevent configuration loading
    Warning,
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `stylecfg` operations.
pub type Result<T> = std::result::Result<T, StyleCfgError>;

// ============================================================================
// Tests
// ============================================================================
