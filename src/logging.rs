//! Logging and tracing utilities.
//!
//! This module provides helpers for setting up structured logging using the
//! `tracing` ecosystem, plus the [`Logger`] sink that the decoder and encoder
//! report through. All logs are written to **stderr** so the host process keeps
//! stdout for itself.
//!
//! # Quick Start
//!
//! ```ignore
//! use typed_provider_sdk::init_logging;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Initialize logging (reads RUST_LOG env var)
//!     init_logging();
//!
//!     tracing::info!("Starting provider");
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Controls log levels (e.g., `info`, `debug`, `typed_provider_sdk=debug`)
//!
//! # Examples
//!
//! ```bash
//! # Show decode warnings and encode traces
//! RUST_LOG=typed_provider_sdk=debug ./my-provider
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// A sink for messages raised while marshalling a model.
///
/// Resource operations receive one through
/// [`ResourceMetaData`](crate::resource::ResourceMetaData), so tests can swap
/// in a recording implementation.
pub trait Logger: Send + Sync {
    /// Fine-grained tracing, e.g. every key written by the encoder.
    fn debug(&self, message: &str);

    /// Lifecycle events, e.g. a resource being marked as gone.
    fn info(&self, message: &str);

    /// Recoverable problems, e.g. a state value with the wrong shape.
    fn warn(&self, message: &str);
}

/// A [`Logger`] that forwards to `tracing` events.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    resource_type: Option<String>,
}

impl TracingLogger {
    /// Create a logger with no resource context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logger that tags every event with `resource_type`.
    pub fn for_resource(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: Some(resource_type.into()),
        }
    }

    fn resource_type(&self) -> &str {
        self.resource_type.as_deref().unwrap_or("")
    }
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(resource_type = self.resource_type(), "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(resource_type = self.resource_type(), "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(resource_type = self.resource_type(), "{}", message);
    }
}

/// A [`Logger`] that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn debug(&self, _message: &str) {}

    fn info(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}
}

fn subscriber(default_level: &str) -> impl tracing::Subscriber + Send + Sync + 'static {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false),
    )
}

/// Initialize the default logging subscriber.
///
/// This sets up a `tracing` subscriber that:
/// - Writes to **stderr**
/// - Respects the `RUST_LOG` environment variable for filtering
/// - Defaults to `info` level if `RUST_LOG` is not set
/// - Uses a compact, human-readable format
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging() {
    subscriber("info").init();
}

/// Initialize logging with a custom default level.
///
/// Like [`init_logging`], but `default_level` is used if `RUST_LOG` is not set.
///
/// # Example
///
/// ```ignore
/// use typed_provider_sdk::init_logging_with_default;
///
/// fn main() {
///     // Surface decode warnings and encode traces
///     init_logging_with_default("debug");
/// }
/// ```
pub fn init_logging_with_default(default_level: &str) {
    subscriber(default_level).init();
}

/// Try to initialize logging, returning false if already initialized.
///
/// Unlike [`init_logging`], this function does not panic if a subscriber
/// has already been set, which makes it safe to call from tests.
pub fn try_init_logging() -> bool {
    subscriber("info").try_init().is_ok()
}

#[cfg(test)]
mod tests {
    // The global subscriber can only be set once per process, so only the
    // non-panicking initializer is exercised here.

    use super::*;

    #[test]
    fn test_env_filter_parsing() {
        assert!(EnvFilter::try_new("info").is_ok());
        assert!(EnvFilter::try_new("typed_provider_sdk=debug").is_ok());
        assert!(EnvFilter::try_new("warn,typed_provider_sdk::decode=debug").is_ok());
    }

    #[test]
    fn test_try_init_logging_is_idempotent() {
        try_init_logging();
        assert!(!try_init_logging());
    }

    #[test]
    fn test_loggers_accept_messages() {
        let loggers: Vec<Box<dyn Logger>> = vec![
            Box::new(NullLogger),
            Box::new(TracingLogger::new()),
            Box::new(TracingLogger::for_resource("example_network")),
        ];
        for logger in &loggers {
            logger.debug("debug");
            logger.info("info");
            logger.warn("warn");
        }
    }
}
