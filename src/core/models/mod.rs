//! Data models for the course catalog

pub mod course;

pub use course::{normalize_number, Course};
