//! Logging setup for the simulator daemon
//!
//! Kept separate from the serving machinery so embedders can wire their own
//! subscriber instead.

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Output style for the daemon's diagnostics
#[derive(Debug, Clone, Copy)]
pub enum LoggingMode {
    /// No output
    Silent,
    /// Compact stderr output
    Development,
    /// Verbose output with source locations
    Debug,
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
}

/// Install a global subscriber for the chosen mode
///
/// Call once, early; a second initialization fails.
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => {
            let subscriber = Registry::default()
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false)
                        .compact(),
                )
                .with(env_filter("info"));

            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
        LoggingMode::Debug => {
            let subscriber = Registry::default()
                .with(
                    fmt::layer()
                        .pretty()
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(env_filter("debug"));

            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
    }
}

/// Pick the mode from `HLX_LOG_MODE` (silent, development, debug)
///
/// Defaults to development; the daemon is meant to be watched.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let mode = match std::env::var("HLX_LOG_MODE").as_deref() {
        Ok("silent") => LoggingMode::Silent,
        Ok("debug") => LoggingMode::Debug,
        _ => LoggingMode::Development,
    };
    init_logging(mode)
}

/// `HLX_LOG_LEVEL` first, then `RUST_LOG`, then the mode's default
fn env_filter(default_level: &str) -> EnvFilter {
    if let Ok(level) = std::env::var("HLX_LOG_LEVEL") {
        EnvFilter::new(level)
    } else if let Ok(rust_log) = std::env::var("RUST_LOG") {
        EnvFilter::new(rust_log)
    } else {
        EnvFilter::new(default_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_mode() {
        assert!(init_logging(LoggingMode::Silent).is_ok());
    }
}
