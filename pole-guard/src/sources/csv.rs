//! CSV pole tables.
//!
//! Reading keeps the header order and every row in input order, so the
//! analyzed table can be written back with the same layout plus the `MR` and
//! `PHOA` columns.

use crate::core::{AnalysisResult, RawRecord, HANDLE_COLUMN};
use crate::error::{PoleError, Result};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, instrument, warn};

/// Header of the appended make-ready explanation column.
pub const MR_COLUMN: &str = "MR";
/// Header of the appended proposed-height column.
pub const PHOA_COLUMN: &str = "PHOA";

/// Options for reading and writing pole tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Whether to trim whitespace around cells
    pub trim: bool,
    /// Whether rows may have fewer or more cells than the header
    pub flexible: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
            flexible: true,
        }
    }
}

impl CsvOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_flexible(mut self, flexible: bool) -> Self {
        self.flexible = flexible;
        self
    }
}

/// A data row that became a pole record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoleRow {
    /// One-based data row number
    pub row: usize,
    /// Cells in header order, padded to the header width
    pub cells: Vec<String>,
    pub record: RawRecord,
}

/// A data row that could not become a pole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRow {
    /// One-based data row number
    pub row: usize,
    /// Cells in header order, padded to the header width
    pub cells: Vec<String>,
    pub reason: String,
}

impl RejectedRow {
    /// Text written to the `MR` column for this row.
    pub fn mr_text(&self) -> String {
        format!("Not analyzed: {}", self.reason)
    }
}

/// One row of a pole table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Pole(PoleRow),
    Rejected(RejectedRow),
}

/// A pole table: header order plus rows in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoleTable {
    headers: Vec<String>,
    rows: Vec<TableRow>,
}

impl PoleTable {
    /// Reads a table from a CSV file.
    #[instrument(skip(path, options), fields(table.path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>, options: &CsvOptions) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let table = Self::from_reader(file, options)?;
        info!(
            table.path = %path.as_ref().display(),
            table.poles = table.pole_count(),
            table.rejected = table.rejected_count(),
            "Loaded pole table"
        );
        Ok(table)
    }

    /// Reads a table from CSV data with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`PoleError::MissingColumn`] when there is no `HANDLE` column and
    /// [`PoleError::Csv`] for malformed CSV.
    ///
    /// ```rust
    /// use pole_guard::sources::{CsvOptions, PoleTable};
    ///
    /// let data = "HANDLE,TYPE,LWSTPWR\n'P1',JNT,30 0\n,JNT,25 0\n";
    /// let table = PoleTable::from_reader(data.as_bytes(), &CsvOptions::default()).unwrap();
    ///
    /// assert_eq!(table.pole_count(), 1);
    /// assert_eq!(table.rejected_count(), 1);
    /// assert_eq!(table.records().next().unwrap().handle(), "P1");
    /// ```
    pub fn from_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(options.delimiter)
            .trim(if options.trim { Trim::All } else { Trim::None })
            .flexible(options.flexible)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if !headers
            .iter()
            .any(|h| h.eq_ignore_ascii_case(HANDLE_COLUMN))
        {
            return Err(PoleError::missing_column(HANDLE_COLUMN));
        }

        let mut table = Self {
            headers,
            rows: Vec::new(),
        };
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (index, result) in reader.records().enumerate() {
            let row = index + 1;
            let cells = table.fitted_cells(row, &result?);
            table.push_row(row, cells, &mut positions);
        }

        Ok(table)
    }

    /// Pads short rows and drops cells beyond the header so the appended
    /// `MR` and `PHOA` columns stay aligned.
    fn fitted_cells(&self, row: usize, record: &StringRecord) -> Vec<String> {
        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        if cells.len() > self.headers.len() {
            warn!(
                table.row = row,
                table.extra_cells = cells.len() - self.headers.len(),
                "Dropped cells beyond the header"
            );
        }
        cells.resize(self.headers.len(), String::new());
        cells
    }

    fn push_row(&mut self, row: usize, cells: Vec<String>, positions: &mut HashMap<String, usize>) {
        let keyed: Vec<(String, String)> = self
            .headers
            .iter()
            .cloned()
            .zip(cells.iter().cloned())
            .collect();

        match RawRecord::try_new(row, keyed) {
            Ok(record) => {
                let handle = record.handle().to_string();
                let pole = TableRow::Pole(PoleRow { row, cells, record });
                match positions.get(&handle) {
                    Some(&position) => {
                        warn!(
                            pole.handle = %handle,
                            table.row = row,
                            "Duplicate pole handle, later row replaces the earlier one"
                        );
                        self.rows[position] = pole;
                    }
                    None => {
                        positions.insert(handle, self.rows.len());
                        self.rows.push(pole);
                    }
                }
            }
            Err(err) => {
                warn!(table.row = row, error = %err, "Rejected table row");
                self.rows.push(TableRow::Rejected(RejectedRow {
                    row,
                    cells,
                    reason: err.to_string(),
                }));
            }
        }
    }

    /// Column headers in input order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows in output order.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Pole records in output order.
    pub fn records(&self) -> impl Iterator<Item = &RawRecord> {
        self.rows.iter().filter_map(|row| match row {
            TableRow::Pole(pole) => Some(&pole.record),
            TableRow::Rejected(_) => None,
        })
    }

    /// Rejected rows in output order.
    pub fn rejected(&self) -> impl Iterator<Item = &RejectedRow> {
        self.rows.iter().filter_map(|row| match row {
            TableRow::Rejected(rejected) => Some(rejected),
            TableRow::Pole(_) => None,
        })
    }

    pub fn pole_count(&self) -> usize {
        self.records().count()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected().count()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Writes the analyzed table: the original columns followed by `MR` and `PHOA`.
///
/// `results` must hold one result per pole record of `table`, in the order of
/// [`PoleTable::records`].
pub fn write_analyzed_table<W: Write>(
    writer: W,
    table: &PoleTable,
    results: &[AnalysisResult],
    options: &CsvOptions,
) -> Result<()> {
    if results.len() != table.pole_count() {
        return Err(PoleError::Internal(format!(
            "{} results for {} poles",
            results.len(),
            table.pole_count()
        )));
    }

    let mut out = WriterBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .from_writer(writer);

    let mut header: Vec<&str> = table.headers().iter().map(String::as_str).collect();
    header.extend([MR_COLUMN, PHOA_COLUMN]);
    out.write_record(&header)?;

    let mut results = results.iter();
    for row in table.rows() {
        match row {
            TableRow::Pole(pole) => {
                let result = results.next().ok_or_else(|| {
                    PoleError::Internal(format!("No result for pole {}", pole.record.handle()))
                })?;
                if result.pole_handle != pole.record.handle() {
                    return Err(PoleError::Internal(format!(
                        "Result for pole {} does not match row {} (pole {})",
                        result.pole_handle,
                        pole.row,
                        pole.record.handle()
                    )));
                }
                let mut cells = pole.cells.clone();
                cells.push(result.mr_text());
                cells.push(result.proposed_height.to_string());
                out.write_record(&cells)?;
            }
            TableRow::Rejected(rejected) => {
                let mut cells = rejected.cells.clone();
                cells.push(rejected.mr_text());
                cells.push(String::new());
                out.write_record(&cells)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

/// Writes the analyzed table to a file.
#[instrument(skip(path, table, results, options), fields(table.path = %path.as_ref().display()))]
pub fn write_analyzed_csv(
    path: impl AsRef<Path>,
    table: &PoleTable,
    results: &[AnalysisResult],
    options: &CsvOptions,
) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_analyzed_table(file, table, results, options)?;
    info!(
        table.path = %path.as_ref().display(),
        table.rows = table.rows().len(),
        "Wrote analyzed pole table"
    );
    Ok(())
}
