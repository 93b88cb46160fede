//! `stylecfg` - configuration schema and loader for utility-class style
//! generators
//!
//! Loads a definition naming the sources to scan for class usage, the
//! theme extensions to merge into the base design tokens, and the plugins
//! to load; checks its shape and values; and hands back an immutable
//! [`config::StyleConfig`]. Scanning and CSS generation belong to the
//! consuming tool.

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;

pub use config::{StyleConfig, load};
pub use error::{ConfigError, StyleCfgError};
