//! Command-line interface
//!
//! Argument definitions and command handlers for the `stylecfg` binary.

pub mod args;
pub mod commands;
