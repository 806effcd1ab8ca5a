//! Core course-catalog functionality shared by the CLI and tests

pub mod catalog;
pub mod config;
pub mod index;
pub mod models;
pub mod shell;

pub use catalog::{load, load_catalog, LoadError, LoadOptions, LoadReport};
pub use index::CourseIndex;
pub use models::Course;
pub use shell::{Session, Shell};
