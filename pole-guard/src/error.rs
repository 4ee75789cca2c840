//! Error types for the pole-guard analysis library.
//!
//! The analysis engine itself never fails on data-quality problems: unparseable
//! heights and missing categories are absorbed into the result. Errors only
//! surface at the boundaries (reading tables, loading configuration, writing
//! output), and all of them are represented by [`PoleError`].

use thiserror::Error;

/// The main error type for the pole-guard library.
#[derive(Error, Debug)]
pub enum PoleError {
    /// A data row has no usable `HANDLE` cell.
    #[error("Row {row} has no pole handle")]
    MissingHandle {
        /// One-based data row number (the header row is not counted)
        row: usize,
    },

    /// A required column is absent from the table header.
    #[error("Column '{column}' not found in pole table")]
    MissingColumn { column: String },

    /// Error from the CSV reader or writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error related to configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error when parsing input that must be well formed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, PoleError>`.
pub type Result<T> = std::result::Result<T, PoleError>;

impl PoleError {
    /// Creates a new configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a new missing column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }
}

impl From<toml::de::Error> for PoleError {
    fn from(err: toml::de::Error) -> Self {
        Self::Configuration(format!("Invalid TOML: {err}"))
    }
}

impl From<std::fmt::Error> for PoleError {
    fn from(err: std::fmt::Error) -> Self {
        Self::Internal(format!("Formatting failed: {err}"))
    }
}

impl From<serde_json::Error> for PoleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<PoleError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| match e.into() {
            PoleError::Internal(inner) => PoleError::Internal(format!("{msg}: {inner}")),
            other => PoleError::Internal(format!("{msg}: {other}")),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let msg = f();
            match e.into() {
                PoleError::Internal(inner) => PoleError::Internal(format!("{msg}: {inner}")),
                other => PoleError::Internal(format!("{msg}: {other}")),
            }
        })
    }
}
