//! Catalog loading: parse a delimited course file into a [`CourseIndex`] and
//! check that every prerequisite names a course that exists.
//!
//! Each line has the form `NUMBER,TITLE[,PREREQ...]`. Loading runs in two
//! passes. The first parses every line and inserts each record right away. The
//! second looks up every prerequisite in the index and fails on the first one
//! that is missing. Records inserted by the first pass stay in the index after
//! a failed second pass unless [`LoadOptions::rollback_on_failure`] is set.
//!
//! [`CourseIndex`]: crate::core::index::CourseIndex

pub mod loader;
pub mod parser;

pub use loader::{load, load_catalog, load_from_reader};
pub use parser::{parse_record_line, split_fields, FIELD_DELIMITER};

use crate::core::config::CatalogConfig;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that fail a whole catalog load
#[derive(Debug, Error)]
pub enum LoadError {
    /// The catalog file could not be opened
    #[error("Cannot open file {}: {source}", path.display())]
    SourceUnavailable {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The catalog file was opened but reading it failed part way through
    #[error("Failed to read line {line}: {source}")]
    Read {
        /// 1-based line number being read
        line: usize,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A prerequisite names a course that is not in the index
    #[error("Prerequisite {prerequisite} of {course} not defined in file")]
    UndefinedPrerequisite {
        /// Course listing the prerequisite
        course: String,
        /// The unresolved prerequisite course number
        prerequisite: String,
    },
}

/// A line that was skipped because it had fewer than two fields or no course number
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Line {line} must have at least course number and title: '{content}'")]
pub struct MalformedRecord {
    /// 1-based line number in the source
    pub line: usize,
    /// The raw line as read
    pub content: String,
}

/// Summary of a successful load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of records parsed and inserted
    pub records: usize,
    /// Lines skipped as malformed
    pub malformed: Vec<MalformedRecord>,
    /// Course numbers that were already present when inserted
    pub duplicates: Vec<String>,
}

impl LoadReport {
    /// Whether every non-blank line produced a record
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty()
    }
}

/// Knobs for [`load_catalog`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Restore the index to its pre-load contents when the load fails
    pub rollback_on_failure: bool,
}

impl From<&CatalogConfig> for LoadOptions {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            rollback_on_failure: config.rollback_on_failure,
        }
    }
}
