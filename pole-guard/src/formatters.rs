//! Report formatting for batch analysis results.
//!
//! # Examples
//!
//! ```rust
//! use pole_guard::core::BatchReport;
//! use pole_guard::formatters::{FormatterConfig, HumanFormatter, ReportFormatter};
//!
//! let report = BatchReport::new("empty");
//! let output = HumanFormatter::with_config(FormatterConfig::minimal())
//!     .format(&report)
//!     .unwrap();
//! assert!(output.contains("No make ready needed"));
//! ```

use crate::attachments::{CategorizedAttachments, Inches, INCHES_PER_FOOT};
use crate::core::{AnalysisResult, BatchReport};
use crate::error::Result;
use std::fmt::Write;

/// Configuration options for formatting batch reports.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Include the summary counters
    pub include_metrics: bool,
    /// Include per-pole results
    pub include_poles: bool,
    /// Include poles that need no make-ready work
    pub include_clear_poles: bool,
    /// Include the categorized attachments of each pole (JSON only)
    pub include_attachments: bool,
    /// Maximum number of poles to list (`None` for all)
    pub max_poles: Option<usize>,
    /// Whether to use ANSI colors (human formatter)
    pub use_colors: bool,
    /// Whether to include the report timestamp
    pub include_timestamps: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_metrics: true,
            include_poles: true,
            include_clear_poles: false,
            include_attachments: false,
            max_poles: None,
            use_colors: true,
            include_timestamps: true,
        }
    }
}

impl FormatterConfig {
    /// Summary counters only.
    pub fn minimal() -> Self {
        Self {
            include_metrics: true,
            include_poles: false,
            include_clear_poles: false,
            include_attachments: false,
            max_poles: Some(0),
            use_colors: false,
            include_timestamps: false,
        }
    }

    /// Everything, including clear poles and their attachments.
    pub fn detailed() -> Self {
        Self {
            include_metrics: true,
            include_poles: true,
            include_clear_poles: true,
            include_attachments: true,
            max_poles: None,
            use_colors: true,
            include_timestamps: true,
        }
    }

    /// Make-ready poles only, capped and without colors.
    pub fn ci() -> Self {
        Self {
            include_metrics: true,
            include_poles: true,
            include_clear_poles: false,
            include_attachments: false,
            max_poles: Some(50),
            use_colors: false,
            include_timestamps: true,
        }
    }

    pub fn with_metrics(mut self, include: bool) -> Self {
        self.include_metrics = include;
        self
    }

    pub fn with_poles(mut self, include: bool) -> Self {
        self.include_poles = include;
        self
    }

    pub fn with_clear_poles(mut self, include: bool) -> Self {
        self.include_clear_poles = include;
        self
    }

    pub fn with_max_poles(mut self, max: Option<usize>) -> Self {
        self.max_poles = max;
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn selected_poles<'a>(&self, report: &'a BatchReport) -> (Vec<&'a AnalysisResult>, usize) {
        if !self.include_poles {
            return (Vec::new(), 0);
        }
        let eligible: Vec<&AnalysisResult> = report
            .results
            .iter()
            .filter(|r| self.include_clear_poles || r.needs_make_ready)
            .collect();
        let shown = self.max_poles.unwrap_or(eligible.len()).min(eligible.len());
        let hidden = eligible.len() - shown;
        (eligible.into_iter().take(shown).collect(), hidden)
    }
}

/// Formats a height in inches as feet and inches, e.g. `22'2"`.
///
/// ```rust
/// use pole_guard::formatters::feet_and_inches;
///
/// assert_eq!(feet_and_inches(266), "22'2\"");
/// assert_eq!(feet_and_inches(-14), "-1'2\"");
/// ```
pub fn feet_and_inches(height: Inches) -> String {
    let sign = if height < 0 { "-" } else { "" };
    let magnitude = height.unsigned_abs();
    let per_foot = INCHES_PER_FOOT.unsigned_abs();
    format!("{sign}{}'{}\"", magnitude / per_foot, magnitude % per_foot)
}

/// Trait for rendering a [`BatchReport`].
///
/// # Examples
///
/// ```rust
/// use pole_guard::core::BatchReport;
/// use pole_guard::formatters::ReportFormatter;
///
/// struct CountFormatter;
///
/// impl ReportFormatter for CountFormatter {
///     fn format(&self, report: &BatchReport) -> pole_guard::error::Result<String> {
///         Ok(format!("{} poles", report.metrics.total_poles))
///     }
/// }
/// ```
pub trait ReportFormatter {
    /// Formats a report.
    fn format(&self, report: &BatchReport) -> Result<String>;

    /// Formats a report with a specific configuration.
    fn format_with_config(&self, report: &BatchReport, _config: &FormatterConfig) -> Result<String> {
        self.format(report)
    }
}

/// Formats reports as JSON.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &BatchReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(&self, report: &BatchReport, config: &FormatterConfig) -> Result<String> {
        let filtered = filter_report(report, config);
        let json = if self.pretty {
            serde_json::to_string_pretty(&filtered)?
        } else {
            serde_json::to_string(&filtered)?
        };
        Ok(json)
    }
}

/// Formats reports for the console.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("\x1b[{color}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

impl ReportFormatter for HumanFormatter {
    fn format(&self, report: &BatchReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(&self, report: &BatchReport, config: &FormatterConfig) -> Result<String> {
        let mut output = String::new();
        let metrics = &report.metrics;
        let colors = config.use_colors;

        writeln!(output)?;
        if report.has_make_ready() {
            let headline = format!("Make ready needed on {} pole(s)", metrics.make_ready_poles);
            writeln!(output, "⚠️  {}", paint(&headline, "33", colors))?;
        } else {
            writeln!(output, "✅ {}", paint("No make ready needed", "32", colors))?;
        }

        writeln!(output)?;
        writeln!(output, "Run: {}", report.name)?;
        if config.include_timestamps {
            writeln!(output, "Timestamp: {}", report.timestamp)?;
        }

        if config.include_metrics {
            writeln!(output)?;
            writeln!(output, "📊 Summary:")?;
            writeln!(output, "   Poles analyzed: {}", metrics.total_poles)?;
            writeln!(
                output,
                "   Make ready: {} ({:.1}%)",
                paint(&metrics.make_ready_poles.to_string(), "31", colors),
                metrics.make_ready_rate()
            )?;
            writeln!(
                output,
                "   Clear: {}",
                paint(&metrics.clear_poles.to_string(), "32", colors)
            )?;
            if metrics.rejected_rows > 0 {
                writeln!(output, "   Rejected rows: {}", metrics.rejected_rows)?;
            }
            writeln!(output, "   Execution Time: {}ms", metrics.execution_time_ms)?;

            if !metrics.reasons_by_check.is_empty() {
                writeln!(output, "   By check:")?;
                for (check, count) in &metrics.reasons_by_check {
                    writeln!(output, "      {check}: {count}")?;
                }
            }
        }

        let (poles, hidden) = config.selected_poles(report);
        if !poles.is_empty() {
            writeln!(output)?;
            writeln!(output, "🔍 Poles:")?;
            for result in poles {
                writeln!(output)?;
                let marker = if result.needs_make_ready {
                    paint("MR", "31", colors)
                } else {
                    paint("OK", "32", colors)
                };
                writeln!(
                    output,
                    "   [{marker}] {} ({} pole, PHOA {} / {} in)",
                    result.pole_handle,
                    result.pole_kind,
                    feet_and_inches(result.proposed_height),
                    result.proposed_height
                )?;
                for reason in &result.reasons {
                    writeln!(output, "      - {reason}")?;
                }
            }
        }
        if hidden > 0 {
            writeln!(output)?;
            writeln!(
                output,
                "   ... and {hidden} more poles (use --max-poles to show more)"
            )?;
        }

        if config.include_poles && !report.rejected.is_empty() {
            writeln!(output)?;
            writeln!(output, "⛔ Rejected rows:")?;
            for rejected in &report.rejected {
                writeln!(output, "   Row {}: {}", rejected.row, rejected.reason)?;
            }
        }

        writeln!(output)?;
        Ok(output)
    }
}

fn filter_report(report: &BatchReport, config: &FormatterConfig) -> BatchReport {
    let (poles, _) = config.selected_poles(report);
    let results = poles
        .into_iter()
        .map(|result| {
            let mut result = result.clone();
            if !config.include_attachments {
                result.categorized = CategorizedAttachments::default();
            }
            result
        })
        .collect();

    BatchReport {
        name: report.name.clone(),
        timestamp: if config.include_timestamps {
            report.timestamp.clone()
        } else {
            String::new()
        },
        metrics: report.metrics.clone(),
        results,
        rejected: if config.include_poles {
            report.rejected.clone()
        } else {
            Vec::new()
        },
    }
}
