//! Shared integration-test harness for running the `stylecfg` binary.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Helpers for invoking the compiled `stylecfg` binary.
pub struct StyleCfgProcess;

impl StyleCfgProcess {
    /// Runs `stylecfg` with the given arguments and waits for it to exit.
    ///
    /// Logging environment overrides are cleared so assertions on stderr
    /// see the default verbosity.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command(args: &[&str]) -> Output {
        Self::spawn_in(args, None)
    }

    /// Same as [`Self::spawn_command`], running in `dir`.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_in(args: &[&str], dir: Option<&Path>) -> Output {
        let bin = env!("CARGO_BIN_EXE_stylecfg");
        let mut command = Command::new(bin);
        command
            .args(args)
            .env_remove("STYLECFG_LOG_LEVEL")
            .env_remove("STYLECFG_LOG_FORMAT")
            .env_remove("STYLECFG_DIR")
            .env("NO_COLOR", "1");
        if let Some(dir) = dir {
            command.current_dir(dir);
        }
        command.output().expect("failed to run stylecfg")
    }

    /// Absolute path to a file under `tests/fixtures`.
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    /// Fixture path as a `String`, for argument lists.
    pub fn fixture_arg(name: &str) -> String {
        Self::fixture_path(name)
            .to_str()
            .expect("non-UTF-8 fixture path")
            .to_string()
    }
}
