//! Two-pass catalog loader

use super::{parse_record_line, LoadError, LoadOptions, LoadReport, MalformedRecord};
use crate::core::index::CourseIndex;
use crate::core::models::Course;
use crate::{debug, error, info, warn};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load a catalog file into `index`, reporting only success or failure
///
/// Failures are logged. Equivalent to [`load_catalog`] with default options.
pub fn load<P: AsRef<Path>>(path: P, index: &mut CourseIndex) -> bool {
    load_catalog(path, index, LoadOptions::default()).is_ok()
}

/// Load a catalog file into `index`
///
/// # Arguments
/// * `path` - Catalog file to read
/// * `index` - Index that receives every parsed record
/// * `options` - Load behavior (rollback on failure)
///
/// # Returns
/// A [`LoadReport`] describing what was inserted and which lines were skipped
///
/// # Errors
/// Returns [`LoadError::SourceUnavailable`] if the file cannot be opened,
/// [`LoadError::Read`] if reading fails, or [`LoadError::UndefinedPrerequisite`]
/// for the first prerequisite that does not resolve.
pub fn load_catalog<P: AsRef<Path>>(
    path: P,
    index: &mut CourseIndex,
    options: LoadOptions,
) -> Result<LoadReport, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| {
        let err = LoadError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        };
        error!("{err}");
        err
    })?;

    debug!("Opened catalog {}", path.display());
    let report = load_from_reader(BufReader::new(file), index, options)?;
    info!(
        "Loaded {} courses from {} ({} malformed lines skipped)",
        report.records,
        path.display(),
        report.malformed.len()
    );
    Ok(report)
}

/// Load catalog lines from any buffered reader into `index`
///
/// The reader is consumed and dropped before prerequisites are validated.
///
/// # Errors
/// Returns [`LoadError::Read`] if reading fails or
/// [`LoadError::UndefinedPrerequisite`] for the first unresolved prerequisite.
pub fn load_from_reader<R: BufRead>(
    reader: R,
    index: &mut CourseIndex,
    options: LoadOptions,
) -> Result<LoadReport, LoadError> {
    let snapshot = options.rollback_on_failure.then(|| index.clone());

    let result = read_records(reader, index).and_then(|(courses, report)| {
        validate_prerequisites(&courses, index)?;
        Ok(report)
    });

    if let Err(err) = &result {
        error!("{err}");
        if let Some(snapshot) = snapshot {
            *index = snapshot;
            warn!("Catalog load failed; index restored to {} courses", index.len());
        }
    }
    result
}

/// First pass: parse every line, insert each record immediately, and keep a
/// copy of each for validation.
///
/// Lines are read as raw bytes; invalid UTF-8 is replaced rather than failing
/// the load.
fn read_records<R: BufRead>(
    mut reader: R,
    index: &mut CourseIndex,
) -> Result<(Vec<Course>, LoadReport), LoadError> {
    let mut courses = Vec::new();
    let mut report = LoadReport::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| LoadError::Read {
                line: line_no + 1,
                source,
            })?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let decoded = String::from_utf8_lossy(&buf);
        if matches!(decoded, Cow::Owned(_)) {
            warn!("Line {line_no} is not valid UTF-8; invalid bytes were replaced");
        }
        let line = decoded.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }

        let Some(course) = parse_record_line(line) else {
            let malformed = MalformedRecord {
                line: line_no,
                content: line.to_string(),
            };
            warn!("{malformed}");
            report.malformed.push(malformed);
            continue;
        };

        if index.contains(&course.number) {
            warn!(
                "Duplicate course number {} on line {line_no}; the earlier record stays visible",
                course.number
            );
            report.duplicates.push(course.number.clone());
        }

        debug!(
            "Line {line_no}: {} ({} prerequisites)",
            course.number,
            course.prerequisites.len()
        );
        index.insert(course.clone());
        courses.push(course);
        report.records += 1;
    }

    Ok((courses, report))
}

/// Second pass: every prerequisite must resolve in the index. Stops at the first miss.
fn validate_prerequisites(courses: &[Course], index: &CourseIndex) -> Result<(), LoadError> {
    for course in courses {
        if let Some(missing) = course.prerequisites.iter().find(|p| !index.contains(p)) {
            return Err(LoadError::UndefinedPrerequisite {
                course: course.number.clone(),
                prerequisite: missing.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load_str(text: &str, index: &mut CourseIndex) -> Result<LoadReport, LoadError> {
        load_from_reader(Cursor::new(text), index, LoadOptions::default())
    }

    #[test]
    fn test_happy_path() {
        let mut index = CourseIndex::new();
        let report = load_str(
            "CSCI100,Introduction to CS\nCSCI200,Data Structures,CSCI100\n",
            &mut index,
        )
        .unwrap();

        assert_eq!(report.records, 2);
        assert!(report.is_clean());
        let numbers: Vec<_> = index.iter().map(|c| c.number.as_str()).collect();
        assert_eq!(numbers, vec!["CSCI100", "CSCI200"]);
    }

    #[test]
    fn test_blank_lines_skipped_silently() {
        let mut index = CourseIndex::new();
        let report = load_str("\nCSCI100,Intro\n\n   \n\r\nCSCI200,DS,CSCI100\n", &mut index).unwrap();
        assert_eq!(report.records, 2);
        assert!(report.malformed.is_empty());
    }

    #[test]
    fn test_malformed_line_reported_and_skipped() {
        let mut index = CourseIndex::new();
        let report = load_str("CSCI100,Intro\nBROKEN\nCSCI300,Algorithms\n", &mut index).unwrap();

        assert_eq!(report.records, 2);
        assert_eq!(
            report.malformed,
            vec![MalformedRecord {
                line: 2,
                content: "BROKEN".to_string()
            }]
        );
        assert!(index.contains("CSCI100"));
        assert!(index.contains("CSCI300"));
    }

    #[test]
    fn test_undefined_prerequisite_keeps_inserted_records() {
        let mut index = CourseIndex::new();
        let err = load_str("CSCI100,Intro,CSCI999\n", &mut index).unwrap_err();

        assert!(matches!(
            err,
            LoadError::UndefinedPrerequisite { ref course, ref prerequisite }
                if course == "CSCI100" && prerequisite == "CSCI999"
        ));
        assert_eq!(index.search("CSCI100").map(|c| c.title.as_str()), Some("Intro"));
    }

    #[test]
    fn test_validation_stops_at_first_missing_prerequisite() {
        let mut index = CourseIndex::new();
        let err = load_str("A,One,X1\nB,Two,X2\n", &mut index).unwrap_err();
        assert!(matches!(
            err,
            LoadError::UndefinedPrerequisite { ref prerequisite, .. } if prerequisite == "X1"
        ));
    }

    #[test]
    fn test_forward_references_resolve() {
        let mut index = CourseIndex::new();
        load_str("CSCI200,DS,CSCI100\nCSCI100,Intro\n", &mut index).unwrap();
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_rollback_restores_previous_contents() {
        let mut index = CourseIndex::new();
        load_str("MATH100,Algebra\n", &mut index).unwrap();

        let options = LoadOptions {
            rollback_on_failure: true,
        };
        let result = load_from_reader(Cursor::new("CSCI100,Intro,CSCI999\n"), &mut index, options);

        assert!(result.is_err());
        assert_eq!(index.len(), 1);
        assert!(index.contains("MATH100"));
        assert!(!index.contains("CSCI100"));
    }

    #[test]
    fn test_duplicates_reported_not_rejected() {
        let mut index = CourseIndex::new();
        let report = load_str("A,first\nA,second\n", &mut index).unwrap();
        assert_eq!(report.records, 2);
        assert_eq!(report.duplicates, vec!["A"]);
        assert_eq!(index.search("A").map(|c| c.title.as_str()), Some("first"));
    }

    #[test]
    fn test_non_utf8_line_is_decoded_lossily() {
        let mut index = CourseIndex::new();
        let bytes: &[u8] = b"CSCI100,Intro\nCSCI110,Caf\xe9 Computing\nCSCI200,DS,CSCI100\n";
        let report = load_from_reader(bytes, &mut index, LoadOptions::default()).unwrap();

        assert_eq!(report.records, 3);
        assert!(report.is_clean());
        assert_eq!(
            index.search("CSCI110").map(|c| c.title.as_str()),
            Some("Caf\u{FFFD} Computing")
        );
        assert!(index.contains("CSCI200"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut index = CourseIndex::new();
        let report = load_str("CSCI100,Intro\r\nCSCI200,DS,CSCI100\r\n", &mut index).unwrap();
        assert_eq!(report.records, 2);
        assert_eq!(
            index.search("CSCI200").map(|c| c.prerequisites.as_slice()),
            Some(["CSCI100".to_string()].as_slice())
        );
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let mut index = CourseIndex::new();
        let err = load_catalog(
            "definitely/not/here/courses.csv",
            &mut index,
            LoadOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::SourceUnavailable { .. }));
        assert!(!load("definitely/not/here/courses.csv", &mut index));
        assert!(index.is_empty());
    }
}
