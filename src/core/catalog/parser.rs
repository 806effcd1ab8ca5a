//! Line parser for catalog files

use crate::core::models::Course;

/// Separator between fields on a catalog line
pub const FIELD_DELIMITER: char = ',';

/// Characters stripped from both ends of every field
const FIELD_WHITESPACE: &[char] = &[' ', '\t', '\r', '\n'];

/// Split a line into trimmed fields
///
/// A delimiter at the very end of the line does not open a new field, so
/// `"A,B,"` yields two fields. Empty fields in the middle are kept.
#[must_use]
pub fn split_fields(line: &str) -> Vec<&str> {
    let body = line.strip_suffix(FIELD_DELIMITER).unwrap_or(line);
    body.split(FIELD_DELIMITER)
        .map(|field| field.trim_matches(FIELD_WHITESPACE))
        .collect()
}

/// Parse a single non-blank catalog line into a course
///
/// # Returns
/// `None` when the line has fewer than two fields or an empty course number.
/// Empty prerequisite fields are dropped.
#[must_use]
pub fn parse_record_line(line: &str) -> Option<Course> {
    let fields = split_fields(line);
    let [number, title, prereqs @ ..] = fields.as_slice() else {
        return None;
    };
    if number.is_empty() {
        return None;
    }

    let mut course = Course::new((*number).to_string(), (*title).to_string());
    for prereq in prereqs.iter().filter(|p| !p.is_empty()) {
        course.add_prerequisite((*prereq).to_string());
    }
    Some(course)
}
