//! Configuration module for `advising`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to [`Config::get_advising_dir`] in string values
const HOME_VAR: &str = "$ADVISING_HOME";

const fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Catalog loading and lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file used when no file name is given
    #[serde(default)]
    pub default_file: String,
    /// Uppercase course numbers typed into the shell before lookup
    #[serde(default = "default_true")]
    pub uppercase_queries: bool,
    /// Restore the index to its pre-load state when a load fails
    #[serde(default)]
    pub rollback_on_failure: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_file: String::new(),
            uppercase_queries: true,
            rollback_on_failure: false,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override default catalog file
    pub default_file: Option<String>,
    /// Override query uppercasing
    pub uppercase_queries: Option<bool>,
    /// Override rollback on failed loads
    pub rollback_on_failure: Option<bool>,
}

impl Config {
    /// Get the `$ADVISING_HOME` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/advising`
    /// - macOS: `~/Library/Application Support/advising`
    /// - Windows: `%APPDATA%\advising`
    #[must_use]
    pub fn get_advising_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("advising")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// filled in. Boolean fields already carry serde defaults.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }
        if self.catalog.default_file.is_empty() && !defaults.catalog.default_file.is_empty() {
            self.catalog
                .default_file
                .clone_from(&defaults.catalog.default_file);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values. The config file itself is not
    /// touched.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// config.apply_overrides(&ConfigOverrides {
    ///     default_file: Some("courses.csv".to_string()),
    ///     ..Default::default()
    /// });
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(default_file) = &overrides.default_file {
            self.catalog.default_file.clone_from(default_file);
        }
        if let Some(uppercase) = overrides.uppercase_queries {
            self.catalog.uppercase_queries = uppercase;
        }
        if let Some(rollback) = overrides.rollback_on_failure {
            self.catalog.rollback_on_failure = rollback;
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_advising_dir`](Self::get_advising_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_advising_dir().join(CONFIG_FILE_NAME)
    }

    fn expand_variables(value: &str) -> String {
        if value.contains(HOME_VAR) {
            let home = Self::get_advising_dir();
            value.replace(HOME_VAR, home.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Expands `$ADVISING_HOME` in path values. Missing fields use their serde
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.catalog.default_file = Self::expand_variables(&config.catalog.default_file);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the compiled-in default configuration is not valid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create it from defaults if not found
    ///
    /// An existing file gets any missing fields merged in from the defaults and is
    /// saved back. On first run the defaults are written out. Any read or parse
    /// failure falls back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `default_file`,
    /// `uppercase_queries`, `rollback_on_failure` (dashes accepted in place of
    /// underscores).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "default_file" | "default-file" => Some(self.catalog.default_file.clone()),
            "uppercase_queries" | "uppercase-queries" => {
                Some(self.catalog.uppercase_queries.to_string())
            }
            "rollback_on_failure" | "rollback-on-failure" => {
                Some(self.catalog.rollback_on_failure.to_string())
            }
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only. Call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or a boolean value does not
    /// parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let parse_bool = |value: &str| {
            value
                .parse::<bool>()
                .map_err(|_| format!("Invalid boolean value for '{key}': '{value}'"))
        };

        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => self.logging.verbose = parse_bool(value)?,
            "default_file" | "default-file" => self.catalog.default_file = value.to_string(),
            "uppercase_queries" | "uppercase-queries" => {
                self.catalog.uppercase_queries = parse_bool(value)?;
            }
            "rollback_on_failure" | "rollback-on-failure" => {
                self.catalog.rollback_on_failure = parse_bool(value)?;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to its value in `defaults`)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "default_file" | "default-file" => self
                .catalog
                .default_file
                .clone_from(&defaults.catalog.default_file),
            "uppercase_queries" | "uppercase-queries" => {
                self.catalog.uppercase_queries = defaults.catalog.uppercase_queries;
            }
            "rollback_on_failure" | "rollback-on-failure" => {
                self.catalog.rollback_on_failure = defaults.catalog.rollback_on_failure;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Delete the config file so the next [`load()`](Config::load) recreates it
    ///
    /// Succeeds without doing anything if there is no file.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[catalog]")?;
        writeln!(f, "  default_file = \"{}\"", self.catalog.default_file)?;
        writeln!(f, "  uppercase_queries = {}", self.catalog.uppercase_queries)?;
        writeln!(f, "  rollback_on_failure = {}", self.catalog.rollback_on_failure)?;

        Ok(())
    }
}
