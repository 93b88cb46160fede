//! Diagnostics output for `stylecfg`.
//!
//! Load warnings and pipeline progress are `tracing` events on stderr, so
//! stdout carries only command output (reports, normalized documents).
//! [`LogSettings`] folds the global flags and `STYLECFG_LOG_LEVEL` into a
//! single filter before [`init_logging`] installs the subscriber.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::cli::args::{Cli, ColorChoice};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_LEVEL_ENV: &str = "STYLECFG_LOG_LEVEL";

/// Filter that silences every event.
const SILENT: &str = "off";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Human,
    /// Newline-delimited JSON.
    Json,
}

/// Process environment consulted when resolving [`LogSettings`].
#[derive(Debug, Clone, Default)]
pub struct LogEnv {
    /// Value of `STYLECFG_LOG_LEVEL`.
    pub level: Option<String>,
    /// Whether `NO_COLOR` is set.
    pub no_color: bool,
    /// Whether stderr is attached to a terminal.
    pub stderr_is_terminal: bool,
}

impl LogEnv {
    /// Reads the current process environment.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            level: std::env::var(LOG_LEVEL_ENV).ok(),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            stderr_is_terminal: std::io::stderr().is_terminal(),
        }
    }
}

/// Resolved subscriber configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub format: LogFormat,
    /// `tracing` filter directive; `"off"` installs nothing.
    pub filter: String,
    pub ansi: bool,
    /// Include event targets (module paths) in output.
    pub targets: bool,
}

impl LogSettings {
    /// Resolves settings from the global flags and the live environment.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self::resolve(cli, &LogEnv::capture())
    }

    /// Resolves settings from the global flags and a captured environment.
    ///
    /// `--quiet` wins over everything. Otherwise a parsable
    /// `STYLECFG_LOG_LEVEL` wins over `-v`.
    #[must_use]
    pub fn resolve(cli: &Cli, env: &LogEnv) -> Self {
        let filter = if cli.quiet {
            SILENT.to_string()
        } else {
            env.level
                .as_deref()
                .map(str::trim)
                .filter(|directive| !directive.is_empty() && EnvFilter::try_new(directive).is_ok())
                .map_or_else(|| verbosity_filter(cli.verbose), str::to_string)
        };

        let ansi = cli.log_format == LogFormat::Human
            && match cli.color {
                ColorChoice::Auto => env.stderr_is_terminal && !env.no_color,
                ColorChoice::Always => true,
                ColorChoice::Never => false,
            };

        Self {
            format: cli.log_format,
            filter,
            ansi,
            targets: cli.verbose >= 2,
        }
    }

    /// Returns `true` if no event can pass the filter.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.filter == SILENT
    }
}

/// Filter for a `-v` count: this crate's events at the requested level,
/// everything else at `warn`.
#[must_use]
pub fn verbosity_filter(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("warn,{}={level}", env!("CARGO_CRATE_NAME"))
}

/// Installs the global subscriber on stderr.
///
/// Does nothing when the settings are silent or a subscriber is already
/// installed.
pub fn init_logging(settings: &LogSettings) {
    if settings.is_silent() {
        return;
    }

    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.filter))
        .with_target(settings.targets)
        .with_writer(std::io::stderr);

    let _ = match settings.format {
        LogFormat::Human => builder.with_ansi(settings.ansi).try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["stylecfg"];
        argv.extend_from_slice(args);
        argv.push("version");
        Cli::try_parse_from(argv).unwrap()
    }

    fn env_with_level(level: &str) -> LogEnv {
        LogEnv {
            level: Some(level.to_string()),
            ..LogEnv::default()
        }
    }

    #[test]
    fn default_is_crate_warn() {
        let settings = LogSettings::resolve(&cli(&[]), &LogEnv::default());
        assert_eq!(settings.filter, "warn,stylecfg=warn");
        assert_eq!(settings.format, LogFormat::Human);
        assert!(!settings.targets);
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(verbosity_filter(1), "warn,stylecfg=info");
        assert_eq!(verbosity_filter(2), "warn,stylecfg=debug");
        assert_eq!(verbosity_filter(3), "warn,stylecfg=trace");
        assert_eq!(verbosity_filter(255), "warn,stylecfg=trace");

        let settings = LogSettings::resolve(&cli(&["-vv"]), &LogEnv::default());
        assert_eq!(settings.filter, "warn,stylecfg=debug");
        assert!(settings.targets);
    }

    #[test]
    fn env_level_overrides_verbosity() {
        let settings = LogSettings::resolve(&cli(&["-v"]), &env_with_level("stylecfg=trace"));
        assert_eq!(settings.filter, "stylecfg=trace");
    }

    #[test]
    fn unparsable_env_level_is_ignored() {
        let settings = LogSettings::resolve(&cli(&["-v"]), &env_with_level("stylecfg=loud"));
        assert_eq!(settings.filter, "warn,stylecfg=info");

        let settings = LogSettings::resolve(&cli(&[]), &env_with_level("  "));
        assert_eq!(settings.filter, "warn,stylecfg=warn");
    }

    #[test]
    fn quiet_wins_over_env_and_verbosity() {
        let settings = LogSettings::resolve(&cli(&["-q", "-vvv"]), &env_with_level("trace"));
        assert!(settings.is_silent());
    }

    #[test]
    fn ansi_follows_color_choice() {
        let tty = LogEnv {
            stderr_is_terminal: true,
            ..LogEnv::default()
        };
        assert!(LogSettings::resolve(&cli(&[]), &tty).ansi);
        assert!(!LogSettings::resolve(&cli(&["--color", "never"]), &tty).ansi);
        assert!(!LogSettings::resolve(&cli(&[]), &LogEnv::default()).ansi);
        assert!(LogSettings::resolve(&cli(&["--color", "always"]), &LogEnv::default()).ansi);

        let no_color = LogEnv {
            no_color: true,
            ..tty
        };
        assert!(!LogSettings::resolve(&cli(&[]), &no_color).ansi);
    }

    #[test]
    fn json_never_uses_ansi() {
        let settings = LogSettings::resolve(
            &cli(&["--log-format", "json", "--color", "always"]),
            &LogEnv::default(),
        );
        assert_eq!(settings.format, LogFormat::Json);
        assert!(!settings.ansi);
    }

    #[test]
    fn init_logging_tolerates_repeat_calls() {
        let settings = LogSettings::resolve(&cli(&[]), &LogEnv::default());
        init_logging(&settings);
        init_logging(&settings);
        init_logging(&LogSettings::resolve(&cli(&["-q"]), &LogEnv::default()));
    }
}
