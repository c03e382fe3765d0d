//! Structured logging setup.
//!
//! Installs a `tracing-subscriber` registry writing to stderr, so stdout stays
//! reserved for command output. `RUST_LOG` takes precedence over the level
//! chosen here.

use crate::config::LogFormat;
use crate::constants::{DEFAULT_LOG_LEVEL, VERBOSE_LOG_LEVEL};
use crate::errors::{AppError, AppResult};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Level directive used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns `AppError::Config` if a global subscriber is already installed.
pub fn init(format: LogFormat, verbose: bool) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| AppError::Config(format!("Failed to initialize logging: {}", e)))
}
