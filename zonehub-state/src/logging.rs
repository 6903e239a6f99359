//! Logging setup for the hub
//!
//! Centralized tracing configuration so embedding applications get a
//! consistent story: silent by default (the hub core never writes to
//! stdout/stderr on its own), compact stderr output for development, and a
//! verbose formatter for debugging.

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Logging mode for different embedding contexts
#[derive(Debug, Clone, Copy)]
pub enum LoggingMode {
    /// No output at all
    Silent,
    /// Compact stderr output for development
    Development,
    /// Verbose diagnostics with source locations
    Debug,
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("invalid environment variable: {0}")]
    InvalidEnv(String),
}

/// Initialize logging with the specified mode
///
/// Call once, early, before any store or translator activity that might
/// emit tracing events. Calling twice fails with `TracingInit` because the
/// global subscriber is already set.
///
/// # Environment Variables
///
/// - `ZONEHUB_LOG_LEVEL`: override the default level (error, warn, info,
///   debug, trace)
/// - `RUST_LOG`: standard tracing filter syntax, consulted after
///   `ZONEHUB_LOG_LEVEL`
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => {
            let filter = create_env_filter("info")?;

            let subscriber = Registry::default()
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false)
                        .compact(),
                )
                .with(filter);

            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
        LoggingMode::Debug => {
            let filter = create_env_filter("debug")?;

            let subscriber = Registry::default()
                .with(
                    fmt::layer()
                        .pretty()
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter);

            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
    }
}

/// Initialize logging from the `ZONEHUB_LOG_MODE` environment variable
///
/// Accepts "silent", "development", or "debug"; anything else (including
/// the variable being unset) means silent.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let mode = match std::env::var("ZONEHUB_LOG_MODE").as_deref() {
        Ok("development") => LoggingMode::Development,
        Ok("debug") => LoggingMode::Debug,
        _ => LoggingMode::Silent,
    };

    init_logging(mode)
}

/// Build the filter: `ZONEHUB_LOG_LEVEL`, then `RUST_LOG`, then the default
fn create_env_filter(default_level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(level) = std::env::var("ZONEHUB_LOG_LEVEL") {
        return level
            .parse::<EnvFilter>()
            .map_err(|e| LoggingError::InvalidEnv(format!("ZONEHUB_LOG_LEVEL: {e}")));
    }

    Ok(EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_mode_is_always_ok() {
        assert!(init_logging(LoggingMode::Silent).is_ok());
    }

    #[test]
    fn test_filter_falls_back_to_default() {
        // RUST_LOG may be set in the environment, but either branch must
        // produce a usable filter
        assert!(create_env_filter("info").is_ok());
    }
}
