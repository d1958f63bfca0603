//! Structured logging with tracing
//!
//! Installs the global subscriber: an `EnvFilter` (overridable through
//! `SVCWIRE_LOG`), text or JSON formatting, and an optional daily-rolling
//! log file.

use std::ffi::OsStr;
use std::path::Path;

use svcwire_domain::error::{Error, Result};
use tracing::{Level, Subscriber, info, warn};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

// Re-export LoggingConfig for convenience
pub use crate::config::LoggingConfig;
use crate::constants::{LOG_ENV_VAR, LOG_FILE_PREFIX};

/// Initialize logging with the provided configuration
///
/// Fails when the level is invalid or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let subscriber = build_subscriber(config, std::io::stdout)?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::configuration_with_source("Failed to install the log subscriber", e))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Build the subscriber `init_logging` installs, writing console output to
/// `writer`
pub fn build_subscriber<W>(
    config: &LoggingConfig,
    writer: W,
) -> Result<Box<dyn Subscriber + Send + Sync>>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = build_filter(config)?;
    let file_appender = config.file_output.as_ref().map(|path| {
        tracing_appender::rolling::daily(
            path.parent().unwrap_or_else(|| Path::new(".")),
            path.file_name().unwrap_or_else(|| OsStr::new(LOG_FILE_PREFIX)),
        )
    });
    let registry = Registry::default().with(filter);

    // Layer types differ per format, hence the separate branches
    if config.json_format {
        let console = fmt::layer()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);
        let file = file_appender.map(|appender| {
            fmt::layer()
                .json()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
        });
        Ok(Box::new(registry.with(console).with(file)))
    } else {
        let console = fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);
        let file = file_appender.map(|appender| {
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
        });
        Ok(Box::new(registry.with(console).with(file)))
    }
}

/// Level filter for `config`; `SVCWIRE_LOG` overrides the configured level
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let level = parse_log_level(&config.level)?;
    Ok(EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase())))
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}
