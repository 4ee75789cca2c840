//! Analysis results for single poles and whole tables.

use super::record::PoleKind;
use crate::attachments::{CategorizedAttachments, Inches};
use crate::clearance::{CheckOutcome, ClearanceVerdict};
use crate::sources::RejectedRow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// First line of the `MR` text of a pole that needs make-ready work.
pub const MAKE_READY_HEADER: &str = "Needs Make Ready for the following reason(s):\n";

/// Builds the `MR` text: empty without reasons, otherwise the header followed
/// by one line per reason.
///
/// ```rust
/// use pole_guard::core::make_ready_text;
///
/// assert_eq!(make_ready_text(&[]), "");
/// assert_eq!(
///     make_ready_text(&["PHOA within 34 inches from lowest power.".to_string()]),
///     "Needs Make Ready for the following reason(s):\nPHOA within 34 inches from lowest power.\n"
/// );
/// ```
pub fn make_ready_text(reasons: &[String]) -> String {
    if reasons.is_empty() {
        return String::new();
    }
    reasons.iter().fold(MAKE_READY_HEADER.to_string(), |mut text, reason| {
        text.push_str(reason);
        text.push('\n');
        text
    })
}

/// The analysis of one pole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub pole_handle: String,
    pub pole_kind: PoleKind,
    /// Proposed height of attachment, in inches
    pub proposed_height: Inches,
    pub needs_make_ready: bool,
    /// Make-ready reasons in check order
    pub reasons: Vec<String>,
    /// Every check outcome in check order
    pub outcomes: Vec<CheckOutcome>,
    pub categorized: CategorizedAttachments,
}

impl AnalysisResult {
    /// Assembles a result from a verdict.
    pub fn from_verdict(
        pole_handle: impl Into<String>,
        pole_kind: PoleKind,
        categorized: CategorizedAttachments,
        verdict: ClearanceVerdict,
    ) -> Self {
        Self {
            pole_handle: pole_handle.into(),
            pole_kind,
            proposed_height: verdict.proposed_height,
            needs_make_ready: verdict.needs_make_ready,
            reasons: verdict.reasons,
            outcomes: verdict.outcomes,
            categorized,
        }
    }

    /// The `MR` column text.
    pub fn mr_text(&self) -> String {
        make_ready_text(&self.reasons)
    }

    /// Outcomes of the checks that triggered make-ready.
    pub fn triggered(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| o.status.is_make_ready())
    }
}

/// Counters for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchMetrics {
    pub total_poles: usize,
    pub make_ready_poles: usize,
    pub clear_poles: usize,
    pub rejected_rows: usize,
    /// Number of poles each check triggered on
    pub reasons_by_check: BTreeMap<String, usize>,
    pub execution_time_ms: u64,
}

impl BatchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one pole result to the counters.
    pub fn record(&mut self, result: &AnalysisResult) {
        self.total_poles += 1;
        if result.needs_make_ready {
            self.make_ready_poles += 1;
        } else {
            self.clear_poles += 1;
        }
        for outcome in result.triggered() {
            *self
                .reasons_by_check
                .entry(outcome.check.clone())
                .or_insert(0) += 1;
        }
    }

    /// Share of analyzed poles needing make-ready, in percent.
    pub fn make_ready_rate(&self) -> f64 {
        if self.total_poles == 0 {
            0.0
        } else {
            (self.make_ready_poles as f64 / self.total_poles as f64) * 100.0
        }
    }
}

/// The analysis of a whole pole table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub name: String,
    /// RFC 3339 time the run finished
    pub timestamp: String,
    pub metrics: BatchMetrics,
    /// One result per pole, in table order
    pub results: Vec<AnalysisResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedRow>,
}

impl BatchReport {
    /// Creates an empty report stamped with the current time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            metrics: BatchMetrics::new(),
            results: Vec::new(),
            rejected: Vec::new(),
        }
    }

    /// Adds a pole result and updates the metrics.
    pub fn add_result(&mut self, result: AnalysisResult) {
        self.metrics.record(&result);
        self.results.push(result);
    }

    /// Adds a rejected row and updates the metrics.
    pub fn add_rejected(&mut self, rejected: RejectedRow) {
        self.metrics.rejected_rows += 1;
        self.rejected.push(rejected);
    }

    pub fn has_make_ready(&self) -> bool {
        self.metrics.make_ready_poles > 0
    }

    /// Results of poles that need make-ready work.
    pub fn make_ready_results(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.results.iter().filter(|r| r.needs_make_ready)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.rejected.is_empty()
    }
}
