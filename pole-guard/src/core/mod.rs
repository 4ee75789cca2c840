//! Core analysis types.
//!
//! ## Overview
//!
//! - **[`RawRecord`]**: one pole as read from the table, with its handle and
//!   [`PoleKind`]
//! - **[`PoleAnalyzer`]**: classifies, aggregates and evaluates one record
//! - **[`AnalysisResult`]**: proposed height, make-ready verdict and reasons
//! - **[`BatchRunner`]**: analyzes a whole [`PoleTable`](crate::sources::PoleTable)
//!   into a [`BatchReport`]
//!
//! ## Architecture
//!
//! ```text
//! RawRecord
//!     └── AttachmentClassifier  → ClassifiedToken*
//!         └── CategorizedAttachments  → extremum per category
//!             └── ClearanceEvaluator  → PHOA, CheckOutcome*, reasons
//!                 └── AnalysisResult
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pole_guard::config::ClearanceConfig;
//! use pole_guard::core::{PoleAnalyzer, RawRecord};
//!
//! let analyzer = PoleAnalyzer::new(ClearanceConfig::new().with_power_clearance(10));
//! let record = RawRecord::builder("P-7")
//!     .cell("LWSTPWR", "PWR 25 0")
//!     .build();
//!
//! let result = analyzer.analyze(&record);
//! assert!(!result.needs_make_ready);
//! ```

mod analyzer;
mod batch;
mod record;
mod result;

pub use analyzer::PoleAnalyzer;
pub use batch::BatchRunner;
pub use record::{
    normalize_handle, PoleKind, RawRecord, RawRecordBuilder, HANDLE_COLUMN, TELEPHONE_POLE_TYPE,
    TYPE_COLUMN,
};
pub use result::{make_ready_text, AnalysisResult, BatchMetrics, BatchReport, MAKE_READY_HEADER};
