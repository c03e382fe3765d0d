//! Configuration management for the jotter application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults. Command-line flags override whatever is loaded
//! here.
//!
//! # Environment Variables
//!
//! - `JOTTER_ENTRIES`: Path to the entry snapshot (defaults to ~/Documents/jotter/entries.json)
//! - `JOTTER_LOG_FORMAT`: `text` or `json` (defaults to `text`)
//! - `JOTTER_ACTION_TIMEOUT_MS`: Timeout for loading the snapshot (defaults to 10000)
//! - `HOME`: Used for expanding the default snapshot path

use crate::constants::{
    DEFAULT_ACTION_TIMEOUT_MS, DEFAULT_ENTRIES_SUBPATH, ENV_VAR_HOME,
    ENV_VAR_JOTTER_ACTION_TIMEOUT_MS, ENV_VAR_JOTTER_ENTRIES, ENV_VAR_JOTTER_LOG_FORMAT,
    LOG_FORMAT_JSON, LOG_FORMAT_TEXT, REDACTED_PATH_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            LOG_FORMAT_TEXT => Ok(LogFormat::Text),
            LOG_FORMAT_JSON => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "Unknown log format '{}': expected '{}' or '{}'",
                other, LOG_FORMAT_TEXT, LOG_FORMAT_JSON
            ))),
        }
    }
}

/// Configuration for the jotter application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use jotter::Config;
/// use jotter::config::LogFormat;
/// use std::path::PathBuf;
/// use std::time::Duration;
///
/// let config = Config {
///     entries_path: PathBuf::from("/path/to/entries.json"),
///     log_format: LogFormat::Json,
///     action_timeout: Duration::from_secs(5),
/// };
/// assert!(config.validate().is_ok());
/// ```
pub struct Config {
    /// Snapshot file the entries are read from.
    ///
    /// Loaded from `JOTTER_ENTRIES` with a fallback to
    /// ~/Documents/jotter/entries.json.
    pub entries_path: PathBuf,

    pub log_format: LogFormat,

    /// Upper bound on how long loading the snapshot may take.
    pub action_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("entries_path", &REDACTED_PATH_PLACEHOLDER)
            .field("log_format", &self.log_format)
            .field("action_timeout", &self.action_timeout)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            entries_path: PathBuf::from(""),
            log_format: LogFormat::Text,
            action_timeout: Duration::from_millis(DEFAULT_ACTION_TIMEOUT_MS),
        }
    }
}

impl Config {
    /// Expands `~` and environment variable references in a path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if expansion fails or the result is empty.
    pub fn expand_path(raw: &str) -> AppResult<PathBuf> {
        let expanded = shellexpand::full(raw)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let path = PathBuf::from(expanded.into_owned());
        if path.as_os_str().is_empty() {
            return Err(AppError::Config("Snapshot path is empty".to_string()));
        }
        Ok(path)
    }

    fn parse_timeout(raw: &str) -> AppResult<Duration> {
        let millis: u64 = raw.trim().parse().map_err(|_| {
            AppError::Config(format!(
                "{} must be a positive integer, got '{}'",
                ENV_VAR_JOTTER_ACTION_TIMEOUT_MS, raw
            ))
        })?;
        if millis == 0 {
            return Err(AppError::Config(format!(
                "{} must be greater than zero",
                ENV_VAR_JOTTER_ACTION_TIMEOUT_MS
            )));
        }
        Ok(Duration::from_millis(millis))
    }

    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The snapshot path expansion fails
    /// - The log format is not `text` or `json`
    /// - The timeout is not a positive integer
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use jotter::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Loaded config: {:?}", config),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let entries_raw = env::var(ENV_VAR_JOTTER_ENTRIES).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_ENTRIES_SUBPATH)
        });
        let entries_path = Config::expand_path(&entries_raw)?;

        let log_format = match env::var(ENV_VAR_JOTTER_LOG_FORMAT) {
            Ok(raw) => raw.parse()?,
            Err(_) => LogFormat::default(),
        };

        let action_timeout = match env::var(ENV_VAR_JOTTER_ACTION_TIMEOUT_MS) {
            Ok(raw) => Config::parse_timeout(&raw)?,
            Err(_) => Duration::from_millis(DEFAULT_ACTION_TIMEOUT_MS),
        };

        Ok(Config {
            entries_path,
            log_format,
            action_timeout,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Snapshot path is empty"
    /// - "Snapshot path must be absolute"
    /// - "Action timeout must be greater than zero"
    pub fn validate(&self) -> AppResult<()> {
        if self.entries_path.as_os_str().is_empty() {
            return Err(AppError::Config("Snapshot path is empty".to_string()));
        }

        if !self.entries_path.is_absolute() {
            return Err(AppError::Config(
                "Snapshot path must be absolute".to_string(),
            ));
        }

        if self.action_timeout.is_zero() {
            return Err(AppError::Config(
                "Action timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn setup() {
        env::remove_var(ENV_VAR_JOTTER_ENTRIES);
        env::remove_var(ENV_VAR_JOTTER_LOG_FORMAT);
        env::remove_var(ENV_VAR_JOTTER_ACTION_TIMEOUT_MS);
    }

    #[test]
    fn test_debug_impl_redacts_path() {
        let config = Config {
            entries_path: PathBuf::from("/home/username/private/entries.json"),
            ..Config::default()
        };

        let debug_output = format!("{:?}", config);
        assert!(debug_output.contains("[REDACTED_PATH]"));
        assert!(!debug_output.contains("/home/username/private"));
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("TEXT".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        match "yaml".parse::<LogFormat>() {
            Err(AppError::Config(message)) => assert!(message.contains("Unknown log format")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(
            Config::parse_timeout("250").unwrap(),
            Duration::from_millis(250)
        );
        assert!(Config::parse_timeout("0").is_err());
        assert!(Config::parse_timeout("-5").is_err());
        assert!(Config::parse_timeout("soon").is_err());
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        setup();
        let config = Config::load().unwrap();
        assert!(config.entries_path.ends_with(DEFAULT_ENTRIES_SUBPATH));
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(
            config.action_timeout,
            Duration::from_millis(DEFAULT_ACTION_TIMEOUT_MS)
        );
    }

    #[test]
    #[serial]
    fn test_load_from_env() {
        setup();
        env::set_var(ENV_VAR_JOTTER_ENTRIES, "/tmp/jotter/entries.json");
        env::set_var(ENV_VAR_JOTTER_LOG_FORMAT, "json");
        env::set_var(ENV_VAR_JOTTER_ACTION_TIMEOUT_MS, "1500");

        let config = Config::load();
        setup();

        let config = config.unwrap();
        assert_eq!(config.entries_path, PathBuf::from("/tmp/jotter/entries.json"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.action_timeout, Duration::from_millis(1500));
    }

    #[test]
    #[serial]
    fn test_load_rejects_bad_timeout() {
        setup();
        env::set_var(ENV_VAR_JOTTER_ACTION_TIMEOUT_MS, "never");
        let result = Config::load();
        setup();

        match result {
            Err(AppError::Config(message)) => assert!(message.contains("positive integer")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_relative_path() {
        let config = Config {
            entries_path: PathBuf::from("relative/entries.json"),
            ..Config::default()
        };
        match config.validate() {
            Err(AppError::Config(message)) => assert!(message.contains("must be absolute")),
            _ => panic!("Expected Config error about relative path"),
        }
    }

    #[test]
    fn test_validate_empty_path() {
        let config = Config::default();
        match config.validate() {
            Err(AppError::Config(message)) => assert!(message.contains("Snapshot path is empty")),
            _ => panic!("Expected Config error about empty path"),
        }
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = Config {
            entries_path: PathBuf::from("/abs/entries.json"),
            action_timeout: Duration::ZERO,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
