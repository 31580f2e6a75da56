//! # Logger
//!
//! Installs the global `tracing` subscriber for the catalog services:
//! a compact console layer, an optional rolling file layer written through a
//! non-blocking worker, and an [`EnvFilter`] seeded from the configured level.
//!
//! Options usually come from the `loggerOptions` configuration section:
//!
//! ```rust
//! # use catalog_domain::options::LoggerOptions;
//! # use catalog_logger::Logger;
//! let options = LoggerOptions { level: "debug".into(), ..LoggerOptions::default() };
//!
//! let _logger = Logger::builder("catalog-service").options(&options).init().unwrap();
//! ```
//!
//! `RUST_LOG` still applies when no explicit `envFilter` is configured.

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use catalog_domain::options::LoggerOptions;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct LoggerConfig {
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            path: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

/// Configures and installs the global tracing subscriber.
#[derive(Debug)]
#[must_use = "The builder must be initialized with .init() to install the logger."]
pub struct LoggerBuilder {
    name: String,
    config: LoggerConfig,
    invalid_level: Option<String>,
}

impl LoggerBuilder {
    /// Applies a bound `loggerOptions` section.
    ///
    /// An unknown level string is reported by [`LoggerBuilder::init`].
    pub fn options(mut self, options: &LoggerOptions) -> Self {
        match LevelFilter::from_str(options.level.trim()) {
            Ok(level) => self.config.level = level,
            Err(_) => self.invalid_level = Some(options.level.clone()),
        }
        self.config.console = options.console;
        self.config.json = options.json;
        self.config.path.clone_from(&options.path);
        self.config.max_files = options.max_files;
        self.config.env_filter.clone_from(&options.env_filter);
        self
    }

    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Explicit filter directives (`catalog_server=debug,tower_http=info`).
    ///
    /// Replaces `RUST_LOG`. Invalid directives make [`LoggerBuilder::init`] fail.
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Writes JSON lines instead of the compact text format.
    pub const fn json(mut self, enabled: bool) -> Self {
        self.config.json = enabled;
        self
    }

    /// Directory for rolling log files named `<name>.<date>.log`.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = Some(path.into());
        self
    }

    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    /// Consumes the builder and installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive for the lifetime of the process; dropping it
    /// stops the file worker.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for invalid settings,
    /// [`LoggerError::Io`] or [`LoggerError::Appender`] when the log directory is unusable
    /// and [`LoggerError::Subscriber`] if a global subscriber is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let env_filter = build_env_filter(&self.config)?;

        let mut layers = Vec::new();

        if self.config.console {
            let console = layer().with_ansi(!self.config.json);
            layers.push(if self.config.json {
                console.json().boxed()
            } else {
                console.compact().boxed()
            });
        }

        let guard = if let Some(path) = &self.config.path {
            fs::create_dir_all(path)
                .context(format!("Failed to create path: {}", path.display()))?;

            let appender = RollingFileAppender::builder()
                .rotation(self.config.rotation.clone())
                .filename_prefix(&self.name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(self.config.max_files)
                .build(path)?;

            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file = layer().with_writer(writer).with_ansi(false);
            layers.push(if self.config.json { file.json().boxed() } else { file.boxed() });
            Some(guard)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console or file output.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        tracing::debug!(
            name = %self.name,
            level = %self.config.level,
            file = self.config.path.is_some(),
            json = self.config.json,
            "Logger initialized"
        );

        Ok(Logger { guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }

        if let Some(level) = &self.invalid_level {
            return Err(LoggerError::InvalidConfiguration {
                message: format!("Unknown log level '{level}'").into(),
                context: Some("loggerOptions.level".into()),
            });
        }

        if self.config.path.is_some() && self.config.max_files == 0 {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
                context: None,
            });
        }

        Ok(())
    }
}

/// Handle to the installed logging system.
///
/// Holds the file worker guard; drop it only when the application shuts down.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a builder. `name` prefixes rolling log files.
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder { name: name.into(), config: LoggerConfig::default(), invalid_level: None }
    }

    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    config.env_filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
                context: None,
            })
        },
    )
}
