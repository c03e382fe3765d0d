//! Constants used throughout the application.
//!
//! This module contains all constants used in the jotter crate, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "jotter";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "Filter, search and summarize journal entries";

// Logging
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log level used when `--verbose` is passed.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Configuration Keys & Environment Variables
/// Environment variable for the entries snapshot path.
pub const ENV_VAR_JOTTER_ENTRIES: &str = "JOTTER_ENTRIES";
/// Environment variable for the log output format.
pub const ENV_VAR_JOTTER_LOG_FORMAT: &str = "JOTTER_LOG_FORMAT";
/// Environment variable for the load action timeout in milliseconds.
pub const ENV_VAR_JOTTER_ACTION_TIMEOUT_MS: &str = "JOTTER_ACTION_TIMEOUT_MS";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default snapshot location relative to the user's home directory.
pub const DEFAULT_ENTRIES_SUBPATH: &str = "Documents/jotter/entries.json";
/// Default timeout for asynchronous actions, in milliseconds.
pub const DEFAULT_ACTION_TIMEOUT_MS: u64 = 10_000;

// Redaction
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PATH_PLACEHOLDER: &str = "[REDACTED_PATH]";

// Sentiment
/// Score assigned to the `negative` label.
pub const SENTIMENT_SCORE_NEGATIVE: u8 = 0;
/// Score assigned to the `neutral` label and to unrecognized labels.
pub const SENTIMENT_SCORE_NEUTRAL: u8 = 50;
/// Score assigned to the `positive` label.
pub const SENTIMENT_SCORE_POSITIVE: u8 = 100;
/// Upper bound of the sentiment scale.
pub const SENTIMENT_SCORE_MAX: u8 = 100;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";

// Action messages
/// Message used when a failed action produced an empty description.
pub const DEFAULT_ACTION_FAILURE_MESSAGE: &str = "Operation failed";

// Tracing
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "jotter";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
