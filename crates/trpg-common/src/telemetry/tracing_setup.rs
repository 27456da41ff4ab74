//! Tracing and logging setup
//!
//! Configures the `tracing` subscriber with environment-based filtering.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{Environment, LogConfig};

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info", "trpg_api=debug")
    pub directive: String,
    /// Enable JSON output format
    pub json: bool,
    /// Include span events (new, close)
    pub span_events: bool,
    /// Include file and line numbers
    pub file_line: bool,
    /// Include thread names
    pub thread_names: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            directive: "info".to_string(),
            json: false,
            span_events: false,
            file_line: true,
            thread_names: false,
        }
    }
}

impl TracingConfig {
    /// Create a production configuration with JSON logging
    #[must_use]
    pub fn production() -> Self {
        Self {
            directive: "info".to_string(),
            json: true,
            span_events: false,
            file_line: false,
            thread_names: false,
        }
    }

    /// Derive the tracing setup from `LOG_LEVEL` / `LOG_FORMAT` and the
    /// deployment environment. An explicit format wins over the environment.
    #[must_use]
    pub fn from_log_config(log: &LogConfig, env: Environment) -> Self {
        let mut config = if env.is_production() {
            Self::production()
        } else {
            Self::default()
        };

        config.directive.clone_from(&log.level);
        match log.format.as_deref().map(str::to_lowercase).as_deref() {
            Some("json") => config.json = true,
            Some("pretty" | "text") => config.json = false,
            _ => {}
        }
        config
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the configured directive. Fails instead
/// of panicking when a subscriber is already set.
pub fn try_init_tracing_with_config(config: TracingConfig) -> Result<(), TracingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.directive))
        .map_err(|_| TracingError::InvalidDirective(config.directive.clone()))?;

    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.json {
        let fmt_layer = fmt::layer()
            .json()
            .with_file(config.file_line)
            .with_line_number(config.file_line)
            .with_thread_names(config.thread_names)
            .with_span_events(span_events);

        registry
            .with(fmt_layer)
            .try_init()
            .map_err(|_| TracingError::AlreadyInitialized)
    } else {
        let fmt_layer = fmt::layer()
            .with_file(config.file_line)
            .with_line_number(config.file_line)
            .with_thread_names(config.thread_names)
            .with_span_events(span_events);

        registry
            .with(fmt_layer)
            .try_init()
            .map_err(|_| TracingError::AlreadyInitialized)
    }
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,

    #[error("Invalid log filter directive: {0}")]
    InvalidDirective(String),
}
