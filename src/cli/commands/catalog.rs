//! Non-interactive catalog commands: `list`, `show`, `check`

use advising_assistant::config::Config;
use advising_assistant::core::models::normalize_number;
use advising_assistant::core::{load_catalog, CourseIndex, LoadOptions, LoadReport};
use advising_assistant::{error, info, verbose};
use std::path::{Path, PathBuf};

/// Pick the catalog path: explicit argument first, then config `default_file`
fn resolve_file(file: Option<&Path>, config: &Config) -> Result<PathBuf, String> {
    match file {
        Some(path) => Ok(path.to_path_buf()),
        None if !config.catalog.default_file.is_empty() => {
            Ok(PathBuf::from(&config.catalog.default_file))
        }
        None => Err(
            "✗ No catalog file given and no `default_file` configured. Pass FILE or use --catalog."
                .to_string(),
        ),
    }
}

fn load_index(path: &Path, config: &Config) -> Result<(CourseIndex, LoadReport), String> {
    let mut index = CourseIndex::new();
    let report = load_catalog(path, &mut index, LoadOptions::from(&config.catalog))
        .map_err(|e| format!("✗ Failed to load {}: {e}", path.display()))?;

    for malformed in &report.malformed {
        eprintln!("✗ {malformed}");
    }
    verbose!(
        "✓ Catalog loaded from {} ({} courses)",
        path.display(),
        report.records
    );
    Ok((index, report))
}

/// Print every course in course-number order
///
/// # Errors
/// Returns a printable message when no file is available or the load fails.
pub fn list(file: Option<&Path>, config: &Config) -> Result<(), String> {
    let path = resolve_file(file, config)?;
    let (index, _) = load_index(&path, config)?;

    println!("Here is a sample schedule:");
    println!();
    for course in &index {
        println!("{course}");
    }
    info!("Listed {} courses from {}", index.len(), path.display());
    Ok(())
}

/// Print each requested course with its prerequisites
///
/// Queries are normalized with the configured uppercasing rule. A missing
/// course is reported but does not stop the remaining lookups.
///
/// # Errors
/// Returns a printable message when the load fails or any course was not found.
pub fn show(file: &Path, courses: &[String], config: &Config) -> Result<(), String> {
    let (index, _) = load_index(file, config)?;

    let mut missing = Vec::new();
    for (i, raw) in courses.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let query = normalize_number(raw, config.catalog.uppercase_queries);

        match index.search(&query) {
            Some(course) => {
                println!("{course}");
                println!("{}", course.prerequisites_line());
            }
            None => {
                println!("Course {query} not found.");
                missing.push(query);
            }
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("✗ Not found: {}", missing.join(", ")))
    }
}

/// Load and validate a catalog, then print a summary
///
/// # Errors
/// Returns a printable message when the load or validation fails.
pub fn check(file: Option<&Path>, config: &Config) -> Result<(), String> {
    let path = resolve_file(file, config)?;
    let (index, report) = load_index(&path, config)
        .inspect_err(|_| error!("Catalog check failed for {}", path.display()))?;

    println!("✓ Catalog is valid: {}", path.display());
    println!("  Courses loaded:    {}", report.records);
    println!("  Malformed lines:   {}", report.malformed.len());
    println!("  Duplicate numbers: {}", report.duplicates.len());
    verbose!("  Tree height:       {}", index.height());
    Ok(())
}
