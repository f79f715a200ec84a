//! Observability for the TR-Tech shop.
//!
//! This crate provides:
//! - `init_logging` - global `tracing` subscriber with compact or JSON output
//! - `TracingNotifier` - a notice sink that writes cart and checkout notices to the log
//! - `FanoutNotifier` - delivers one notice to several sinks

mod logging;
mod notifier;

pub use logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
pub use notifier::{FanoutNotifier, TracingNotifier};

use thiserror::Error;

/// Errors from observability setup.
#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("unknown log level: {0}")]
    UnknownLevel(String),

    #[error("logging already initialised: {0}")]
    AlreadyInitialized(String),
}

impl From<tracing_subscriber::util::TryInitError> for ObservabilityError {
    fn from(err: tracing_subscriber::util::TryInitError) -> Self {
        Self::AlreadyInitialized(err.to_string())
    }
}
