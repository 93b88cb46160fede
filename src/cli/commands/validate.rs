//! `validate` command
//!
//! Validates every named file (or the conventional one), then renders a
//! per-file report. All files are checked even after a failure; the first
//! failure decides the exit code.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::{ConfigLoader, LoadResult, LoaderOptions};
use crate::error::{ConfigError, StyleCfgError};

/// Validation outcome for one file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: String,
    pub valid: bool,
    pub errors: Vec<IssueReport>,
    pub warnings: Vec<IssueReport>,
}

/// One error or warning in a [`FileReport`].
#[derive(Debug, Serialize)]
pub struct IssueReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub message: String,
}

/// Totals across all files.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub files: usize,
    pub valid: usize,
    pub invalid: usize,
    pub warnings: usize,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    files: &'a [FileReport],
    summary: Summary,
}

impl FileReport {
    fn valid(path: &Path, result: &LoadResult) -> Self {
        Self {
            file: path.display().to_string(),
            valid: true,
            errors: Vec::new(),
            warnings: result
                .warnings
                .iter()
                .map(|w| IssueReport {
                    path: w.location.clone(),
                    message: w.message.clone(),
                })
                .collect(),
        }
    }

    fn invalid(path: &Path, err: &ConfigError) -> Self {
        let errors = match err {
            ConfigError::Validation { issues, .. } => issues
                .iter()
                .map(|i| IssueReport {
                    path: Some(i.path.clone()),
                    message: i.message.clone(),
                })
                .collect(),
            ConfigError::Schema { path, reason } => vec![IssueReport {
                path: Some(path.clone()),
                message: reason.clone(),
            }],
            other => vec![IssueReport {
                path: None,
                message: other.to_string(),
            }],
        };

        Self {
            file: path.display().to_string(),
            valid: false,
            errors,
            warnings: Vec::new(),
        }
    }
}

/// Builds the totals for a set of reports.
#[must_use]
pub fn summarize(reports: &[FileReport]) -> Summary {
    let valid = reports.iter().filter(|r| r.valid).count();
    Summary {
        files: reports.len(),
        valid,
        invalid: reports.len() - valid,
        warnings: reports.iter().map(|r| r.warnings.len()).sum(),
    }
}

/// Validate configuration files.
///
/// # Errors
///
/// Returns the first file's error if any file fails, or an error if the
/// conventional file cannot be found.
pub fn run(args: &ValidateArgs) -> Result<(), StyleCfgError> {
    let loader = ConfigLoader::new(LoaderOptions {
        base_dir: args.dir.clone(),
        strict: args.strict,
        ..LoaderOptions::default()
    });

    let files: Vec<PathBuf> = if args.files.is_empty() {
        vec![loader.locate()?]
    } else {
        args.files.clone()
    };

    let mut reports = Vec::with_capacity(files.len());
    let mut first_error = None;

    for path in &files {
        tracing::info!(file = %path.display(), "validating configuration");

        match loader.load_from_path(path) {
            Ok(result) => {
                super::log_warnings(&result.warnings);
                tracing::info!(file = %path.display(), "configuration valid");
                reports.push(FileReport::valid(path, &result));
            }
            Err(err) => {
                tracing::debug!(file = %path.display(), error = %err, "configuration invalid");
                reports.push(FileReport::invalid(path, &err));
                first_error.get_or_insert(err);
            }
        }
    }

    render(&reports, args.format)?;

    match first_error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn render(reports: &[FileReport], format: OutputFormat) -> Result<(), StyleCfgError> {
    match format {
        OutputFormat::Human => {
            for report in reports {
                if report.valid {
                    match report.warnings.len() {
                        0 => println!("{}: ok", report.file),
                        n => println!("{}: ok ({n} warnings)", report.file),
                    }
                } else {
                    eprintln!("{}: invalid", report.file);
                    for issue in &report.errors {
                        match &issue.path {
                            Some(path) => eprintln!("  {path}: {}", issue.message),
                            None => eprintln!("  {}", issue.message),
                        }
                    }
                }
            }
        }
        OutputFormat::Json => {
            let report = Report {
                files: reports,
                summary: summarize(reports),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
