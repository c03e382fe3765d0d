//! Error handling utilities for the jotter crate.
//!
//! This module provides the central error type `AppError`, the convenience alias
//! `AppResult`, and `ActionError`, the normalized failure recorded by the
//! operation lifecycle manager when a wrapped action rejects.
//!
//! The query engine never produces errors: contradictory criteria simply match
//! nothing. Caller-side validation (for example an empty title) is out of scope
//! and never reported here.

use crate::constants::DEFAULT_ACTION_FAILURE_MESSAGE;
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Shared, cloneable cause of an action failure.
pub type ActionCause = Arc<dyn StdError + Send + Sync + 'static>;

/// A structured failure of an asynchronous action.
///
/// Carries a human-readable message plus the original error as its source.
/// The cause lives behind an `Arc` so the same failure can be stored in the
/// operation state, handed to observers and returned to the caller.
///
/// # Examples
///
/// ```
/// use jotter::errors::ActionError;
/// use std::io::{self, ErrorKind};
///
/// let error = ActionError::from_cause(io::Error::new(ErrorKind::Other, "backend offline"));
/// assert_eq!(error.message(), "backend offline");
/// assert!(std::error::Error::source(&error).is_some());
/// ```
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ActionError {
    message: String,
    #[source]
    cause: Option<ActionCause>,
}

impl ActionError {
    /// Creates an error with a message and no underlying cause.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: if message.trim().is_empty() {
                DEFAULT_ACTION_FAILURE_MESSAGE.to_string()
            } else {
                message
            },
            cause: None,
        }
    }

    /// Normalizes an arbitrary error into an `ActionError`.
    ///
    /// The message is taken from the error's `Display` output, falling back to a
    /// generic message when that is blank.
    pub fn from_cause<E>(cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let mut error = Self::new(cause.to_string());
        error.cause = Some(Arc::new(cause));
        error
    }

    /// Failure recorded when an action exceeds its time limit.
    pub fn timed_out(limit: Duration) -> Self {
        Self::new(format!("Operation timed out after {} ms", limit.as_millis()))
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The original error, if any.
    pub fn cause(&self) -> Option<&ActionCause> {
        self.cause.as_ref()
    }
}

/// Represents all possible errors that can occur in the jotter crate.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use jotter::errors::AppError;
///
/// let error = AppError::Config("Snapshot path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Snapshot path is empty");
/// ```
///
/// Converting from an IO error:
/// ```
/// use jotter::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in an entry snapshot or criteria payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A snapshot that parsed but violates entry invariants.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// A wrapped asynchronous action failed.
    #[error("Action failed: {0}")]
    Action(#[from] ActionError),

    /// Invalid command-line input, such as an unparsable date.
    #[error("Invalid argument: {0}")]
    Cli(String),

    /// No async runtime was available where one was required.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use jotter::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Snapshot("duplicate id".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
