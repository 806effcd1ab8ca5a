//! CLI argument definitions for `advising`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use advising_assistant::config::ConfigOverrides;
use advising_assistant::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level` for
/// runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&Level::from(*self), f)
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    Get {
        /// Optional configuration key to display (e.g., `level`, `default_file`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive course planner menu (the default).
    Shell,
    /// Load a catalog and print every course in course-number order.
    List {
        /// Catalog file (defaults to config `default_file`)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Load a catalog and print one or more courses with their prerequisites.
    Show {
        /// Catalog file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Course numbers to display
        #[arg(value_name = "COURSE", num_args = 1.., required = true)]
        courses: Vec<String>,
    },
    /// Load and validate a catalog, then print a summary.
    Check {
        /// Catalog file (defaults to config `default_file`)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "advising",
    about = "Course catalog advising assistant",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config default catalog file
    #[arg(long = "config-catalog", value_name = "FILE")]
    pub config_catalog: Option<PathBuf>,

    /// Override config default catalog file (short form)
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Override whether typed course numbers are uppercased (true/false)
    #[arg(long = "config-uppercase", value_parser = BoolishValueParser::new())]
    pub config_uppercase: Option<bool>,

    /// Override whether a failed load restores the index (true/false)
    #[arg(long = "config-rollback", value_parser = BoolishValueParser::new())]
    pub config_rollback: Option<bool>,

    /// Subcommand to execute. Runs the interactive shell when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--catalog`) take precedence over long-form flags
    /// (e.g., `--config-catalog`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            default_file: self
                .catalog
                .as_ref()
                .or(self.config_catalog.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
            uppercase_queries: self.config_uppercase,
            rollback_on_failure: self.config_rollback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli() -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            config_catalog: None,
            catalog: None,
            config_uppercase: None,
            config_rollback: None,
            command: None,
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = bare_cli().to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.default_file.is_none());
        assert!(overrides.uppercase_queries.is_none());
        assert!(overrides.rollback_on_failure.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli {
            config_level: Some(LogLevelArg::Debug),
            config_log_file: Some(PathBuf::from("/tmp/advising.log")),
            config_verbose: Some(true),
            config_uppercase: Some(false),
            config_rollback: Some(true),
            catalog: Some(PathBuf::from("courses.csv")),
            ..bare_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/advising.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.default_file, Some("courses.csv".to_string()));
        assert_eq!(overrides.uppercase_queries, Some(false));
        assert_eq!(overrides.rollback_on_failure, Some(true));
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let cli = Cli {
            config_catalog: Some(PathBuf::from("long.csv")),
            catalog: Some(PathBuf::from("short.csv")),
            ..bare_cli()
        };
        assert_eq!(
            cli.to_config_overrides().default_file,
            Some("short.csv".to_string())
        );

        let cli = Cli {
            config_catalog: Some(PathBuf::from("long.csv")),
            ..bare_cli()
        };
        assert_eq!(
            cli.to_config_overrides().default_file,
            Some("long.csv".to_string())
        );
    }

    #[test]
    fn test_subcommand_is_optional() {
        let cli = Cli::try_parse_from(["advising"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["advising", "show", "c.csv", "csci100", "csci200"]).unwrap();
        match cli.command {
            Some(Command::Show { file, courses }) => {
                assert_eq!(file, PathBuf::from("c.csv"));
                assert_eq!(courses, vec!["csci100", "csci200"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
