//! Structured log output for the engine.

use crate::config::LoggingConfig;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV_VAR: &str = "TASK_ENGINE_LOG";

/// Errors raised while installing the log subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter directive does not parse.
    #[error("invalid log filter `{directive}`: {reason}")]
    InvalidFilter {
        /// Directive as configured.
        directive: String,
        /// Parser message.
        reason: String,
    },
    /// The subscriber could not be installed.
    #[error("failed to initialize tracing subscriber: {0}")]
    Install(String),
}

/// Installs the global `tracing` subscriber.
///
/// `TASK_ENGINE_LOG` takes precedence over [`LoggingConfig::filter`]. Returns
/// `Ok(false)` without touching anything when a global subscriber is already
/// set, so repeated calls are harmless.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when the configured directive
/// does not parse, or [`TelemetryError::Install`] when installation fails.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool, TelemetryError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|error| TelemetryError::Install(error.to_string()))?;
    Ok(true)
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV_VAR) {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.filter).map_err(|error| TelemetryError::InvalidFilter {
        directive: config.filter.clone(),
        reason: error.to_string(),
    })
}
