//! Interactive course-planner menu
//!
//! [`Session`] holds the index and remembers whether a catalog was loaded.
//! [`Shell`] reads menu choices from any [`BufRead`] and writes everything the
//! user sees to any [`Write`], so the whole dialogue can be driven from tests.

use crate::core::catalog::{load_catalog, LoadError, LoadOptions, LoadReport};
use crate::core::config::CatalogConfig;
use crate::core::index::CourseIndex;
use crate::core::models::normalize_number;
use crate::{debug, info};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Behavior settings for a [`Session`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// File loaded when the user leaves the filename prompt blank
    pub default_file: Option<PathBuf>,
    /// Uppercase course numbers before looking them up
    pub uppercase_queries: bool,
    /// Options passed to the loader
    pub load: LoadOptions,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            default_file: None,
            uppercase_queries: true,
            load: LoadOptions::default(),
        }
    }
}

impl From<&CatalogConfig> for SessionOptions {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            default_file: (!config.default_file.is_empty())
                .then(|| PathBuf::from(&config.default_file)),
            uppercase_queries: config.uppercase_queries,
            load: LoadOptions::from(config),
        }
    }
}

/// State shared by every menu action: the index and whether data is loaded
#[derive(Debug, Default)]
pub struct Session {
    index: CourseIndex,
    loaded: bool,
    options: SessionOptions,
}

impl Session {
    /// Create a session with an empty index
    #[must_use]
    pub fn new(options: SessionOptions) -> Self {
        Self {
            index: CourseIndex::new(),
            loaded: false,
            options,
        }
    }

    /// The session's course index
    #[must_use]
    pub const fn index(&self) -> &CourseIndex {
        &self.index
    }

    /// Whether any load has succeeded in this session
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Load a catalog into the session's index
    ///
    /// A failed load never clears the loaded flag set by an earlier success.
    ///
    /// # Errors
    /// Propagates the loader's [`LoadError`].
    pub fn load_file(&mut self, path: &Path) -> Result<LoadReport, LoadError> {
        let report = load_catalog(path, &mut self.index, self.options.load)?;
        self.loaded = true;
        Ok(report)
    }

    /// Normalize a typed course number the way lookups expect it
    #[must_use]
    pub fn normalize_query(&self, query: &str) -> String {
        normalize_number(query, self.options.uppercase_queries)
    }
}

/// One parsed answer to the main menu prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// 1. Load Data Structure
    Load,
    /// 2. Print Course List
    PrintList,
    /// 3. Print Course
    PrintCourse,
    /// 9. Exit
    Exit,
    /// Any other number
    Other(i64),
}

impl MenuChoice {
    /// Parse a menu answer. Returns `None` when it is not a number.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let choice = match input.trim().parse::<i64>().ok()? {
            1 => Self::Load,
            2 => Self::PrintList,
            3 => Self::PrintCourse,
            9 => Self::Exit,
            n => Self::Other(n),
        };
        Some(choice)
    }
}

const MENU: &str = "Welcome to the course planner.

 1. Load Data Structure
 2. Print Course List
 3. Print Course
 9. Exit

What would you like to do? ";

const NOT_LOADED: &str = "No data loaded. Please load data first.";

/// Menu loop over an input and an output stream
pub struct Shell<R, W> {
    input: R,
    output: W,
    session: Session,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Create a shell around a session
    pub const fn new(input: R, output: W, session: Session) -> Self {
        Self {
            input,
            output,
            session,
        }
    }

    /// The session driven by this shell
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Take the session and output back, e.g. to inspect a transcript
    pub fn into_parts(self) -> (Session, W) {
        (self.session, self.output)
    }

    /// Run the menu until the user exits or input ends
    ///
    /// # Errors
    /// Returns any I/O error from reading input or writing output.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "{MENU}")?;
            self.output.flush()?;

            let Some(answer) = self.read_line()? else {
                debug!("Input closed; leaving menu");
                return Ok(());
            };

            let Some(choice) = MenuChoice::parse(&answer) else {
                writeln!(self.output, "Invalid input. Please enter a number.")?;
                continue;
            };

            if choice == MenuChoice::Exit {
                writeln!(self.output, "Thank you for using the course planner!")?;
                return Ok(());
            }
            self.handle(choice)?;
            writeln!(self.output)?;
        }
    }

    fn handle(&mut self, choice: MenuChoice) -> io::Result<()> {
        match choice {
            MenuChoice::Load => self.load_data(),
            MenuChoice::PrintList => self.print_course_list(),
            MenuChoice::PrintCourse => self.print_course(),
            MenuChoice::Other(n) => writeln!(self.output, "{n} is not a valid option."),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn load_data(&mut self) -> io::Result<()> {
        write!(self.output, "Enter filename: ")?;
        self.output.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        let typed = answer.trim();

        let path = if typed.is_empty() {
            self.session.options.default_file.clone()
        } else {
            Some(PathBuf::from(typed))
        };
        let Some(path) = path else {
            writeln!(self.output, "Error: No filename given")?;
            return writeln!(self.output, "Failed to load data.");
        };

        info!("Loading catalog from {}", path.display());
        match self.session.load_file(&path) {
            Ok(report) => {
                for malformed in &report.malformed {
                    writeln!(self.output, "Error: {malformed}")?;
                }
                writeln!(self.output, "Data loaded successfully.")
            }
            Err(err) => {
                writeln!(self.output, "Error: {err}")?;
                writeln!(self.output, "Failed to load data.")
            }
        }
    }

    fn print_course_list(&mut self) -> io::Result<()> {
        if !self.session.loaded {
            return writeln!(self.output, "{NOT_LOADED}");
        }
        writeln!(self.output, "Here is a sample schedule:")?;
        writeln!(self.output)?;
        for course in &self.session.index {
            writeln!(self.output, "{course}")?;
        }
        Ok(())
    }

    fn print_course(&mut self) -> io::Result<()> {
        if !self.session.loaded {
            return writeln!(self.output, "{NOT_LOADED}");
        }
        write!(self.output, "What course do you want to know about? ")?;
        self.output.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        let query = self.session.normalize_query(&answer);

        match self.session.index.search(&query) {
            Some(course) => {
                writeln!(self.output, "{course}")?;
                writeln!(self.output, "{}", course.prerequisites_line())
            }
            None => writeln!(self.output, "Course {query} not found."),
        }
    }

    /// Read one line, without its terminator. `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}
