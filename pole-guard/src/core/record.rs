//! Raw pole records as read from the source table.

use crate::error::{PoleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column holding the pole identifier.
pub const HANDLE_COLUMN: &str = "HANDLE";
/// Column holding the pole type discriminator.
pub const TYPE_COLUMN: &str = "TYPE";
/// `TYPE` value marking a telephone-only pole.
pub const TELEPHONE_POLE_TYPE: &str = "TELCOPL";

/// The kind of pole, which decides the clearance rules that apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoleKind {
    /// Pole shared by power and communication (the default)
    #[default]
    Joint,
    /// Telephone-only pole
    Telephone,
}

impl PoleKind {
    /// Determines the pole kind from a `TYPE` cell.
    ///
    /// Unknown or missing types are joint poles.
    pub fn from_type(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case(TELEPHONE_POLE_TYPE) {
            PoleKind::Telephone
        } else {
            PoleKind::Joint
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PoleKind::Joint => "joint",
            PoleKind::Telephone => "telephone",
        }
    }
}

impl fmt::Display for PoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalizes a raw handle: surrounding whitespace and every `'` are removed.
pub fn normalize_handle(raw: &str) -> String {
    raw.replace('\'', "").trim().to_string()
}

/// One pole: its handle and every cell keyed by column name, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    handle: String,
    cells: Vec<(String, String)>,
}

impl RawRecord {
    /// Builds a record from the cells of one table row.
    ///
    /// `row` is the one-based data row number, used only for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`PoleError::MissingHandle`] when the row has no `HANDLE` cell
    /// or the handle is empty after normalization.
    pub fn try_new(row: usize, cells: Vec<(String, String)>) -> Result<Self> {
        let handle = cells
            .iter()
            .find(|(column, _)| column.trim().eq_ignore_ascii_case(HANDLE_COLUMN))
            .map(|(_, value)| normalize_handle(value))
            .filter(|handle| !handle.is_empty())
            .ok_or(PoleError::MissingHandle { row })?;

        Ok(Self { handle, cells })
    }

    /// Starts building a record by hand.
    ///
    /// ```rust
    /// use pole_guard::core::{PoleKind, RawRecord};
    ///
    /// let record = RawRecord::builder("P-100")
    ///     .cell("TYPE", "TELCOPL")
    ///     .cell("PLHT", "45 0")
    ///     .build();
    ///
    /// assert_eq!(record.handle(), "P-100");
    /// assert_eq!(record.pole_kind(), PoleKind::Telephone);
    /// assert_eq!(record.get("plht"), Some("45 0"));
    /// ```
    pub fn builder(handle: impl Into<String>) -> RawRecordBuilder {
        RawRecordBuilder {
            handle: handle.into(),
            cells: Vec::new(),
        }
    }

    /// The normalized pole handle.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Iterates over `(column, value)` pairs in column order.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    /// Looks up a cell by column name, ignoring ASCII case.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c.trim().eq_ignore_ascii_case(column))
            .map(|(_, v)| v.as_str())
    }

    /// The pole kind according to the `TYPE` cell.
    pub fn pole_kind(&self) -> PoleKind {
        self.get(TYPE_COLUMN)
            .map(PoleKind::from_type)
            .unwrap_or_default()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Builder for [`RawRecord`].
#[derive(Debug, Clone)]
pub struct RawRecordBuilder {
    handle: String,
    cells: Vec<(String, String)>,
}

impl RawRecordBuilder {
    /// Appends a cell.
    pub fn cell(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.cells.push((column.into(), value.into()));
        self
    }

    pub fn build(self) -> RawRecord {
        RawRecord {
            handle: normalize_handle(&self.handle),
            cells: self.cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(c, v)| (c.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_handle_quotes_are_stripped() {
        let record = RawRecord::try_new(1, cells(&[("HANDLE", "'12345'")])).unwrap();
        assert_eq!(record.handle(), "12345");
    }

    #[test]
    fn test_missing_handle_is_rejected() {
        let err = RawRecord::try_new(3, cells(&[("TYPE", "JNT")])).unwrap_err();
        assert!(matches!(err, PoleError::MissingHandle { row: 3 }));
    }

    #[test]
    fn test_quote_only_handle_is_rejected() {
        let err = RawRecord::try_new(2, cells(&[("HANDLE", " '' ")])).unwrap_err();
        assert!(matches!(err, PoleError::MissingHandle { row: 2 }));
    }

    #[test]
    fn test_pole_kind_from_type() {
        assert_eq!(PoleKind::from_type("TELCOPL"), PoleKind::Telephone);
        assert_eq!(PoleKind::from_type(" telcopl "), PoleKind::Telephone);
        assert_eq!(PoleKind::from_type("JOINT"), PoleKind::Joint);
        assert_eq!(PoleKind::from_type(""), PoleKind::Joint);
    }

    #[test]
    fn test_missing_type_is_joint() {
        let record = RawRecord::builder("P1").cell("LWSTPWR", "30 0").build();
        assert_eq!(record.pole_kind(), PoleKind::Joint);
    }

    #[test]
    fn test_cells_keep_column_order() {
        let record = RawRecord::builder("P1")
            .cell("B", "2")
            .cell("A", "1")
            .build();
        let columns: Vec<&str> = record.cells().map(|(c, _)| c).collect();
        assert_eq!(columns, vec!["B", "A"]);
        assert_eq!(record.len(), 2);
    }
}
