//! Interactive shell command handler

use advising_assistant::config::Config;
use advising_assistant::core::shell::{Session, SessionOptions, Shell};
use advising_assistant::debug;
use std::io;

/// Run the course planner menu on stdin/stdout
///
/// # Errors
/// Returns a printable message if the terminal cannot be read or written.
pub fn run(config: &Config) -> Result<(), String> {
    let options = SessionOptions::from(&config.catalog);
    debug!("Starting shell with {options:?}");

    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout(), Session::new(options));
    shell
        .run()
        .map_err(|e| format!("✗ Terminal I/O failed: {e}"))
}
