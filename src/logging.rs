//! Structured logging setup.
//!
//! Logs go to stderr so stdout only ever carries the report. `RUST_LOG`
//! overrides the configured filter when set.

use std::{io, str::FromStr};

use tracing::Level;

use crate::error::{AppResult, config_error, logging_error};

/// Logging configuration for the analyzer.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for this crate; dependencies stay at `warn`
    pub level:       Level,
    /// Whether to use JSON output format
    pub json_format: bool,
    /// Whether text logs may carry ANSI colors
    pub ansi:        bool
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level:       Level::WARN,
            json_format: false,
            ansi:        false
        }
    }
}

impl LoggingConfig {
    /// Configuration with the crate level parsed from a name such as `"info"`
    pub fn from_level_name(name: &str) -> AppResult<Self> {
        let level = Level::from_str(name.trim())
            .map_err(|_| config_error(format!("Unknown log level: '{}'", name)))?;
        Ok(Self {
            level,
            ..Self::default()
        })
    }

    /// Sets the log level for this crate.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets whether to use JSON output format.
    pub fn with_json_format(mut self, enabled: bool) -> Self {
        self.json_format = enabled;
        self
    }

    /// Sets whether text logs use ANSI colors.
    pub fn with_ansi(mut self, enabled: bool) -> Self {
        self.ansi = enabled;
        self
    }

    /// Builds the environment filter string.
    pub fn env_filter(&self) -> String {
        format!("warn,airline_analyzer={}", self.level.as_str().to_lowercase())
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns error if a global subscriber is already set
pub fn init_logging(config: &LoggingConfig) -> AppResult<()> {
    use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

    let fmt_layer = if config.json_format {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(config.ansi)
            .with_target(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| logging_error(format!("Failed to initialize logging: {}", e)))
}
