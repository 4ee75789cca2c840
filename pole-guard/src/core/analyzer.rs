//! Single-pole analysis.

use super::record::RawRecord;
use super::result::AnalysisResult;
use crate::attachments::{AttachmentClassifier, CategorizedAttachments};
use crate::clearance::{ClearanceCheck, ClearanceEvaluator};
use crate::config::{AnalyzerConfig, ClearanceConfig};
use crate::logging::{truncate_field, LogConfig};
use crate::{log_check, log_classification, perf_debug};
use tracing::instrument;

/// Classifies, aggregates and evaluates one pole at a time.
///
/// An analyzer holds no per-pole state, so one instance can be shared across
/// threads and reused for every pole of a table.
///
/// # Examples
///
/// ```rust
/// use pole_guard::config::ClearanceConfig;
/// use pole_guard::core::{PoleAnalyzer, RawRecord};
///
/// let analyzer = PoleAnalyzer::new(ClearanceConfig::default());
/// let record = RawRecord::builder("P-1")
///     .cell("LWSTPWR", "PWR 25 0")
///     .build();
///
/// let result = analyzer.analyze(&record);
/// assert_eq!(result.proposed_height, 266);
/// assert!(result.needs_make_ready);
/// assert_eq!(result.reasons, vec!["PHOA within 34 inches from lowest power."]);
/// ```
#[derive(Debug)]
pub struct PoleAnalyzer {
    classifier: AttachmentClassifier,
    evaluator: ClearanceEvaluator,
    log: LogConfig,
}

impl Default for PoleAnalyzer {
    fn default() -> Self {
        Self::new(ClearanceConfig::default())
    }
}

impl PoleAnalyzer {
    /// Creates an analyzer with the standard checks.
    pub fn new(clearance: ClearanceConfig) -> Self {
        Self {
            classifier: AttachmentClassifier::new(),
            evaluator: ClearanceEvaluator::new(clearance),
            log: LogConfig::default(),
        }
    }

    /// Creates an analyzer from a full analyzer configuration.
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(config.clearance).with_log_config(config.log.clone())
    }

    pub fn with_log_config(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// Adds a check evaluated after the standard ones.
    pub fn with_check(mut self, check: Box<dyn ClearanceCheck>) -> Self {
        self.evaluator = self.evaluator.with_check(check);
        self
    }

    pub fn clearance_config(&self) -> &ClearanceConfig {
        self.evaluator.config()
    }

    /// Analyzes one pole. Never fails: unreadable cells only remove data.
    #[instrument(skip(self, record), fields(pole.handle = %record.handle()))]
    pub fn analyze(&self, record: &RawRecord) -> AnalysisResult {
        let kind = record.pole_kind();
        let tokens = self.classifier.classify_record(record);

        for token in &tokens {
            log_classification!(
                self.log,
                pole.handle = %record.handle(),
                token.column = %token.column,
                token.name = %truncate_field(&token.name, self.log.max_field_length),
                token.height = ?token.height,
                token.category = %token.category,
                "Classified attachment"
            );
        }

        let categorized = CategorizedAttachments::from_tokens(&tokens);
        let verdict = self.evaluator.evaluate(kind, &categorized);

        for outcome in verdict.outcomes.iter().filter(|o| o.status.is_make_ready()) {
            log_check!(
                self.log,
                pole.handle = %record.handle(),
                check.name = %outcome.check,
                check.diff = ?outcome.diff,
                check.threshold = ?outcome.threshold,
                check.binding = ?outcome.binding.as_ref().map(|b| b.name.as_str()),
                "Clearance check requires make ready"
            );
        }

        perf_debug!(
            self.log,
            pole.handle = %record.handle(),
            pole.kind = %kind,
            pole.phoa = verdict.proposed_height,
            pole.make_ready = verdict.needs_make_ready,
            pole.attachments = categorized.attachment_count(),
            "Pole analyzed"
        );

        AnalysisResult::from_verdict(record.handle(), kind, categorized, verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachments::Category;
    use crate::clearance::CheckStatus;
    use crate::core::PoleKind;

    #[test]
    fn test_no_communication_uses_default_phoa() {
        let record = RawRecord::builder("P1").cell("LWSTPWR", "PWR 40 0").build();
        let result = PoleAnalyzer::default().analyze(&record);
        assert_eq!(result.proposed_height, 266);
        assert!(!result.needs_make_ready);
        assert_eq!(result.mr_text(), "");
    }

    #[test]
    fn test_power_below_phoa() {
        let record = RawRecord::builder("P2")
            .cell("CATV", "CATV 18 6")
            .cell("LWSTPWR", "PWR 18 0")
            .build();
        let result = PoleAnalyzer::default().analyze(&record);
        assert_eq!(result.proposed_height, 234);
        assert_eq!(result.reasons, vec!["PHOA is 18 inches above lowest power."]);
    }

    #[test]
    fn test_telephone_pole_path() {
        let record = RawRecord::builder("T1")
            .cell("TYPE", "TELCOPL")
            .cell("PLHT", "45 0")
            .cell("LWSTPWR", "PWR 22 6")
            .cell("TRFCCRCT", "TRFC 22 4")
            .build();
        let result = PoleAnalyzer::default().analyze(&record);

        assert_eq!(result.pole_kind, PoleKind::Telephone);
        assert_eq!(result.proposed_height, 266);
        assert!(!result.needs_make_ready);
        let statuses: Vec<(&str, CheckStatus)> = result
            .outcomes
            .iter()
            .map(|o| (o.check.as_str(), o.status))
            .collect();
        assert_eq!(
            statuses,
            vec![
                ("streetlight_bottom", CheckStatus::Skipped),
                ("circuit", CheckStatus::Skipped),
                ("pole_top", CheckStatus::Clear),
                ("lowest_power", CheckStatus::Skipped),
                ("transformer_bottom", CheckStatus::Skipped),
            ]
        );
    }

    #[test]
    fn test_unparseable_cells_are_absorbed() {
        let record = RawRecord::builder("P3")
            .cell("LWSTPWR", "PWR")
            .cell("CATV", "CATV ??")
            .build();
        let result = PoleAnalyzer::default().analyze(&record);
        assert!(result.categorized.is_empty());
        assert_eq!(result.proposed_height, 266);
        assert!(!result.needs_make_ready);
    }

    #[test]
    fn test_result_keeps_categorized_sets() {
        let record = RawRecord::builder("P4")
            .cell("STLT", "BTM 25 10")
            .cell("CATV", "CATV 18 6/TELCO 15 0")
            .build();
        let result = PoleAnalyzer::default().analyze(&record);
        let stlt = result.categorized.get(Category::StreetlightBottom).unwrap();
        assert_eq!(stlt.get("STLT BTM"), Some(310));
        assert_eq!(result.categorized.get(Category::Communication).unwrap().len(), 2);
    }

    #[test]
    fn test_custom_check_runs_last() {
        #[derive(Debug)]
        struct AlwaysTooClose;

        impl ClearanceCheck for AlwaysTooClose {
            fn name(&self) -> &str {
                "always"
            }
            fn threshold(&self, _config: &ClearanceConfig) -> crate::attachments::Inches {
                i32::MAX
            }
            fn binding<'a>(
                &self,
                categorized: &'a CategorizedAttachments,
            ) -> Option<&'a crate::attachments::Attachment> {
                categorized.extremum(Category::Communication)
            }
            fn wording(&self) -> crate::clearance::ObstacleWording {
                crate::clearance::ObstacleWording::new("anything", "anything")
            }
        }

        let analyzer = PoleAnalyzer::default().with_check(Box::new(AlwaysTooClose));
        let record = RawRecord::builder("P5").cell("CATV", "18 6").build();
        let result = analyzer.analyze(&record);
        assert_eq!(result.outcomes.len(), 6);
        assert_eq!(
            result.reasons,
            vec!["PHOA is 12 inches above anything."]
        );
    }
}
