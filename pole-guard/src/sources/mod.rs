//! Pole table sources and sinks.
//!
//! Tables are read into a [`PoleTable`], which keeps every row (including rows
//! rejected for a missing handle) in input order so results can be written
//! back alongside the original cells.

use crate::error::Result;
use std::fmt::Debug;
use std::path::PathBuf;

mod csv;

pub use self::csv::{
    write_analyzed_csv, write_analyzed_table, CsvOptions, PoleRow, PoleTable, RejectedRow,
    TableRow, MR_COLUMN, PHOA_COLUMN,
};

/// A source of pole records.
///
/// # Examples
///
/// ```rust,no_run
/// use pole_guard::sources::{CsvSource, PoleSource};
///
/// # fn example() -> pole_guard::error::Result<()> {
/// let source = CsvSource::new("poles.csv");
/// let table = source.load()?;
/// println!("{} poles from {}", table.pole_count(), source.description());
/// # Ok(())
/// # }
/// ```
pub trait PoleSource: Debug + Send + Sync {
    /// Reads the whole table.
    fn load(&self) -> Result<PoleTable>;

    /// Returns a human-readable description of this source.
    fn description(&self) -> String;
}

/// A CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    options: CsvOptions,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: CsvOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CsvOptions) -> Self {
        self.options = options;
        self
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn options(&self) -> &CsvOptions {
        &self.options
    }
}

impl PoleSource for CsvSource {
    fn load(&self) -> Result<PoleTable> {
        PoleTable::from_path(&self.path, &self.options)
    }

    fn description(&self) -> String {
        format!("CSV file {}", self.path.display())
    }
}
