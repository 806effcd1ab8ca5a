//! Shared library for the `advising` course planner.
//!
//! Loads a course catalog from a delimited text file into an ordered
//! [`CourseIndex`](core::index::CourseIndex) and drives the interactive
//! [`Shell`](core::shell::Shell) used by the CLI.

pub mod core;
pub mod logger;
pub mod shared;

pub use crate::core::config;
pub use shared::*;
