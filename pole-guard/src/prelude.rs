//! Prelude for commonly used types and traits in pole-guard.

pub use crate::attachments::{Category, Inches};
pub use crate::clearance::{CheckOutcome, CheckStatus, ClearanceCheck};
pub use crate::config::{AnalyzerConfig, ClearanceConfig};
pub use crate::core::{AnalysisResult, BatchReport, BatchRunner, PoleAnalyzer, PoleKind, RawRecord};
pub use crate::error::{ErrorContext, PoleError, Result};
pub use crate::formatters::{FormatterConfig, HumanFormatter, JsonFormatter, ReportFormatter};
pub use crate::logging::LogConfig;
pub use crate::sources::{write_analyzed_table, CsvOptions, PoleTable};
