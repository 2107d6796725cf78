//! Layered configuration loading using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TASK_ENGINE_*` prefix, `__` as separator)
//! 2. `task-engine.toml` in the working directory
//! 3. Built-in defaults
//!
//! `TASK_ENGINE_LIFECYCLE__IN_PROGRESS_LIMIT` maps to
//! `lifecycle.in_progress_limit`, `TASK_ENGINE_IDENTITY__BASE_URL` to
//! `identity.base_url`, and so on.

use crate::task::services::LifecyclePolicy;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "task-engine.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TASK_ENGINE_";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider failed or a value had the wrong shape.
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Business-rule limits.
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    /// Identity service client settings.
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Lifecycle stream settings.
    #[serde(default)]
    pub events: EventsConfig,
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Task store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl EngineConfig {
    /// Loads configuration from defaults, `task-engine.toml`, and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be read or a value does
    /// not fit its field.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Loads configuration using `path` as the TOML layer.
    ///
    /// A missing file contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be read or a value does
    /// not fit its field.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::figment_from(path).extract()?)
    }

    /// Builds the provider chain for the default file location.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_from(DEFAULT_CONFIG_FILE)
    }

    /// Builds the provider chain with `path` as the TOML layer.
    #[must_use]
    pub fn figment_from(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Returns the lifecycle policy described by this configuration.
    #[must_use]
    pub const fn lifecycle_policy(&self) -> LifecyclePolicy {
        LifecyclePolicy {
            in_progress_limit: self.lifecycle.in_progress_limit,
            identity_timeout: self.identity.timeout(),
        }
    }
}

/// Business-rule limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LifecycleConfig {
    /// Maximum number of in-progress tasks per assignee.
    pub in_progress_limit: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            in_progress_limit: LifecyclePolicy::DEFAULT_IN_PROGRESS_LIMIT,
        }
    }
}

/// Identity service client settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Base URL of the identity service.
    pub base_url: String,
    /// Per-lookup timeout in milliseconds.
    pub timeout_ms: u64,
}

impl IdentityConfig {
    /// Returns the per-lookup timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: "http://user-api:8080".to_owned(),
            timeout_ms: 2_000,
        }
    }
}

/// Lifecycle stream settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EventsConfig {
    /// Buffer size of the in-process lifecycle channel.
    pub channel_capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1024,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emits JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            json: false,
        }
    }
}

/// Task store settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL. The in-memory store is used when unset.
    pub url: Option<String>,
}
