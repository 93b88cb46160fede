//! Observability module
//!
//! Structured logging for `stylecfg` via `tracing`.

pub mod logging;

pub use logging::{LogEnv, LogFormat, LogSettings, init_logging, verbosity_filter};
