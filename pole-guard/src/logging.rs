//! Logging utilities and configuration for pole-guard.
//!
//! Analysis of large pole tables produces one event per token and per check
//! when fully enabled, so the per-run switches in [`LogConfig`] gate the noisy
//! events while batch summaries are always emitted.

use tracing::Level;

/// Logging configuration for an analysis run.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Base log level for pole-guard components
    pub base_level: Level,
    /// Whether to log every classified token
    pub log_classification: bool,
    /// Whether to log every triggered clearance check
    pub log_checks: bool,
    /// Whether to log table reads and writes
    pub log_table_operations: bool,
    /// Maximum length for logged cell values
    pub max_field_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            base_level: Level::INFO,
            log_classification: false,
            log_checks: true,
            log_table_operations: true,
            max_field_length: 256,
        }
    }
}

impl LogConfig {
    /// Creates a verbose configuration suitable for debugging classification.
    pub fn verbose() -> Self {
        Self {
            base_level: Level::DEBUG,
            log_classification: true,
            log_checks: true,
            log_table_operations: true,
            max_field_length: 1024,
        }
    }

    /// Creates a minimal configuration for large production runs.
    pub fn production() -> Self {
        Self {
            base_level: Level::WARN,
            log_classification: false,
            log_checks: false,
            log_table_operations: false,
            max_field_length: 128,
        }
    }

    /// Creates a balanced configuration suitable for most runs.
    pub fn balanced() -> Self {
        Self::default()
    }
}

/// Debug logging that is skipped entirely below the configured base level.
#[macro_export]
macro_rules! perf_debug {
    ($config:expr, $($arg:tt)*) => {
        if $config.base_level >= tracing::Level::DEBUG {
            tracing::debug!($($arg)*);
        }
    };
}

/// Logs a classification event when token logging is enabled.
#[macro_export]
macro_rules! log_classification {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_classification {
            tracing::debug!($($arg)*);
        }
    };
}

/// Logs a triggered clearance check when check logging is enabled.
#[macro_export]
macro_rules! log_check {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_checks {
            tracing::warn!($($arg)*);
        }
    };
}

/// Logs a table read or write when table logging is enabled.
#[macro_export]
macro_rules! log_table_op {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_table_operations {
            tracing::info!($($arg)*);
        }
    };
}

/// Truncates a cell value to at most `max_length` bytes, on a char boundary.
pub fn truncate_field(value: &str, max_length: usize) -> String {
    if value.len() <= max_length {
        return value.to_string();
    }
    let mut end = max_length;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...(truncated)", &value[..end])
}

/// Subscriber installation for binaries and demos.
pub mod setup {
    use tracing::Level;

    /// Configuration for installing the global subscriber.
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        /// Log level for everything outside pole-guard
        pub level: Level,
        /// Log level for pole-guard components
        pub crate_level: Level,
        /// Whether to use JSON output format
        pub json_format: bool,
        /// Environment filter override
        pub env_filter: Option<String>,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::INFO,
                crate_level: Level::INFO,
                json_format: false,
                env_filter: None,
            }
        }
    }

    impl LoggingConfig {
        /// Creates a configuration for production use.
        pub fn production() -> Self {
            Self {
                level: Level::WARN,
                crate_level: Level::INFO,
                json_format: true,
                env_filter: None,
            }
        }

        /// Creates a configuration for development use.
        pub fn development() -> Self {
            Self {
                level: Level::DEBUG,
                crate_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }

        pub fn with_level(mut self, level: Level) -> Self {
            self.level = level;
            self
        }

        pub fn with_crate_level(mut self, level: Level) -> Self {
            self.crate_level = level;
            self
        }

        pub fn with_json_format(mut self, enabled: bool) -> Self {
            self.json_format = enabled;
            self
        }

        pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
            self.env_filter = Some(filter.into());
            self
        }

        /// Builds the environment filter string.
        pub fn env_filter(&self) -> String {
            match self.env_filter {
                Some(ref filter) => filter.clone(),
                None => format!(
                    "{},pole_guard={}",
                    self.level.as_str().to_lowercase(),
                    self.crate_level.as_str().to_lowercase()
                ),
            }
        }
    }

    /// Installs a global `tracing` subscriber.
    ///
    /// `RUST_LOG` takes precedence over the configured filter.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use pole_guard::logging::setup::{init_logging, LoggingConfig};
    ///
    /// init_logging(LoggingConfig::development().with_json_format(true)).unwrap();
    /// ```
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

        let fmt_layer = if config.json_format {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;

        Ok(())
    }
}
