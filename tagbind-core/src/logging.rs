//! Logging bootstrap for applications embedding tagbind.
//!
//! The library itself only emits `tracing` events (malformed directives,
//! schema construction, validation outcomes). Binaries decide where those
//! go by installing a subscriber, typically once at startup:
//!
//! ```no_run
//! use tagbind_core::logging::*;
//!
//! let _guard = LogConfig::new()
//!     .level(LogLevel::Debug)
//!     .format(LogFormat::Pretty)
//!     .try_init()
//!     .expect("subscriber already installed");
//!
//! info!("validation logging enabled");
//! ```

use std::io;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, trace, warn};

/// Log level for filtering messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert to string for EnvFilter
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON format (default) - structured, machine-readable
    Json,
    /// Pretty format - multi-line, for development
    Pretty,
    /// Compact format - minimal output
    Compact,
}

/// Output destination for logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Include target (module path)
    pub targets: bool,
    /// Custom environment filter (overrides level if set)
    pub env_filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Json,
            output: LogOutput::Stdout,
            targets: true,
            env_filter: None,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_targets(mut self, enable: bool) -> Self {
        self.targets = enable;
        self
    }

    /// Set custom environment filter, e.g. `"tagbind_validation=trace"`.
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Filter used by the subscriber: explicit filter, then `RUST_LOG`, then `level`.
    pub fn build_filter(&self) -> EnvFilter {
        match &self.env_filter {
            Some(filter) => {
                EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
            }
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.level.as_str())),
        }
    }

    /// Install the global subscriber.
    ///
    /// The returned guard flushes buffered output when dropped; keep it alive
    /// for the lifetime of the program. Fails if a global subscriber is
    /// already set.
    pub fn try_init(self) -> Result<WorkerGuard, crate::Error> {
        let (writer, guard) = match self.output {
            LogOutput::Stdout => tracing_appender::non_blocking(io::stdout()),
            LogOutput::Stderr => tracing_appender::non_blocking(io::stderr()),
        };
        self.install(writer)
            .map_err(|e| crate::Error::Internal(format!("logging already initialized: {}", e)))?;
        Ok(guard)
    }

    /// Like [`LogConfig::try_init`] but returns `None` when a subscriber
    /// is already installed.
    pub fn init(self) -> Option<WorkerGuard> {
        self.try_init().ok()
    }

    fn install(
        &self,
        writer: NonBlocking,
    ) -> Result<(), tracing_subscriber::util::TryInitError> {
        let filter = self.build_filter();
        let registry = tracing_subscriber::registry().with(filter);

        match self.format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(writer)
                        .with_target(self.targets),
                )
                .try_init(),
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_writer(writer)
                        .with_target(self.targets),
                )
                .try_init(),
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_writer(writer)
                        .with_target(self.targets),
                )
                .try_init(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.output, LogOutput::Stdout);
        assert!(config.env_filter.is_none());
    }

    #[test]
    fn test_builder() {
        let config = LogConfig::new()
            .level(LogLevel::Trace)
            .format(LogFormat::Compact)
            .output(LogOutput::Stderr)
            .with_targets(false)
            .with_env_filter("tagbind_validation=trace");
        assert_eq!(config.level, LogLevel::Trace);
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.output, LogOutput::Stderr);
        assert!(!config.targets);
        assert_eq!(
            config.env_filter.as_deref(),
            Some("tagbind_validation=trace")
        );
    }

    #[test]
    fn test_explicit_filter_is_used() {
        let config = LogConfig::new()
            .level(LogLevel::Warn)
            .with_env_filter("tagbind_validation=trace");
        assert!(config.build_filter().to_string().contains("tagbind_validation=trace"));
    }

    #[test]
    fn test_second_init_fails() {
        let first = LogConfig::new().output(LogOutput::Stderr).try_init();
        let second = LogConfig::new().output(LogOutput::Stderr).try_init();
        assert!(first.is_ok());
        assert!(second.is_err());
    }
}
