//! Course model

use std::fmt;

/// A single catalog entry: course number, title, and prerequisite course numbers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Course {
    /// Course number used as the index key (e.g., "CSCI200"). Case-sensitive as stored.
    pub number: String,

    /// Course title (e.g., "Data Structures")
    pub title: String,

    /// Prerequisite course numbers, in the order they were listed
    pub prerequisites: Vec<String>,
}

impl Course {
    /// Create a course with no prerequisites
    ///
    /// # Arguments
    /// * `number` - Course number (index key)
    /// * `title` - Course title
    #[must_use]
    pub const fn new(number: String, title: String) -> Self {
        Self {
            number,
            title,
            prerequisites: Vec::new(),
        }
    }

    /// The "not found" record: every field empty
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(String::new(), String::new())
    }

    /// Whether this is the "not found" record (empty course number)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.number.is_empty()
    }

    /// Append a prerequisite course number. Order is kept and repeats are not collapsed.
    pub fn add_prerequisite(&mut self, prereq: String) {
        self.prerequisites.push(prereq);
    }

    /// Builder form of [`add_prerequisite`](Self::add_prerequisite)
    #[must_use]
    pub fn with_prerequisites<I, S>(mut self, prereqs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites.extend(prereqs.into_iter().map(Into::into));
        self
    }

    /// Format the prerequisites line shown for a single course
    ///
    /// # Returns
    /// `"Prerequisites: A, B"`, or `"Prerequisites: None"` when there are none
    #[must_use]
    pub fn prerequisites_line(&self) -> String {
        if self.prerequisites.is_empty() {
            "Prerequisites: None".to_string()
        } else {
            format!("Prerequisites: {}", self.prerequisites.join(", "))
        }
    }
}

/// Normalize a typed course number for lookup: trim it, and uppercase it when
/// `uppercase` is set
#[must_use]
pub fn normalize_number(query: &str, uppercase: bool) -> String {
    let trimmed = query.trim();
    if uppercase {
        trimmed.to_uppercase()
    } else {
        trimmed.to_string()
    }
}

/// Formats as `"<number>, <title>"`, the listing line used by the shell
impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.number, self.title)
    }
}
