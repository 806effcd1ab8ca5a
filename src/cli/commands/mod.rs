//! CLI command handlers for `advising`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod catalog;
pub mod config;
pub mod shell;
