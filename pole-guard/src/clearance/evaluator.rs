//! Proposed-height computation and verdict accumulation.

use super::check::{CheckOutcome, ClearanceCheck};
use super::checks::standard_checks;
use crate::attachments::{CategorizedAttachments, Category, Inches};
use crate::config::ClearanceConfig;
use crate::core::PoleKind;
use serde::{Deserialize, Serialize};

/// Proposed height used when a pole has no communication attachment (22'2").
pub const DEFAULT_PROPOSED_HEIGHT: Inches = 266;

/// Separation kept above the highest communication attachment.
pub const COMMUNICATION_SEPARATION: Inches = 12;

/// Computes the proposed height of attachment (PHOA) for a pole.
///
/// ```rust
/// use pole_guard::attachments::CategorizedAttachments;
/// use pole_guard::clearance::proposed_height;
///
/// assert_eq!(proposed_height(&CategorizedAttachments::default()), 266);
/// ```
pub fn proposed_height(categorized: &CategorizedAttachments) -> Inches {
    match categorized.extremum(Category::Communication) {
        Some(highest) if highest.height > 0 => {
            highest.height.saturating_add(COMMUNICATION_SEPARATION)
        }
        _ => DEFAULT_PROPOSED_HEIGHT,
    }
}

/// The clearance verdict for one pole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearanceVerdict {
    pub proposed_height: Inches,
    pub needs_make_ready: bool,
    /// Triggered reasons in evaluation order
    pub reasons: Vec<String>,
    /// Every check outcome in evaluation order
    pub outcomes: Vec<CheckOutcome>,
}

/// Runs an ordered list of clearance checks against categorized attachments.
#[derive(Debug)]
pub struct ClearanceEvaluator {
    config: ClearanceConfig,
    checks: Vec<Box<dyn ClearanceCheck>>,
}

impl Default for ClearanceEvaluator {
    fn default() -> Self {
        Self::new(ClearanceConfig::default())
    }
}

impl ClearanceEvaluator {
    /// Creates an evaluator with the standard checks.
    pub fn new(config: ClearanceConfig) -> Self {
        Self {
            config,
            checks: standard_checks(),
        }
    }

    /// Appends a check after the standard ones.
    pub fn with_check(mut self, check: Box<dyn ClearanceCheck>) -> Self {
        self.checks.push(check);
        self
    }

    pub fn config(&self) -> &ClearanceConfig {
        &self.config
    }

    pub fn checks(&self) -> &[Box<dyn ClearanceCheck>] {
        &self.checks
    }

    /// Evaluates every check. Each check is independent of the others.
    pub fn evaluate(&self, kind: PoleKind, categorized: &CategorizedAttachments) -> ClearanceVerdict {
        let proposed_height = proposed_height(categorized);

        let outcomes: Vec<CheckOutcome> = self
            .checks
            .iter()
            .map(|check| check.evaluate(kind, categorized, proposed_height, &self.config))
            .collect();

        let reasons: Vec<String> = outcomes
            .iter()
            .filter_map(|outcome| outcome.reason().map(str::to_string))
            .collect();

        ClearanceVerdict {
            proposed_height,
            needs_make_ready: !reasons.is_empty(),
            reasons,
            outcomes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachments::ClassifiedToken;

    fn categorized(tokens: &[(Category, &str, Inches)]) -> CategorizedAttachments {
        let tokens: Vec<ClassifiedToken> = tokens
            .iter()
            .map(|(category, name, height)| ClassifiedToken {
                column: "CATV".to_string(),
                name: name.to_string(),
                height: Some(*height),
                category: *category,
                unnamed: false,
            })
            .collect();
        CategorizedAttachments::from_tokens(&tokens)
    }

    #[test]
    fn test_proposed_height_from_highest_comm() {
        let set = categorized(&[
            (Category::Communication, "CATV", 222),
            (Category::Communication, "TELCO", 180),
        ]);
        assert_eq!(proposed_height(&set), 234);
    }

    #[test]
    fn test_proposed_height_defaults_for_zero_comm() {
        let set = categorized(&[(Category::Communication, "CATV", 0)]);
        assert_eq!(proposed_height(&set), DEFAULT_PROPOSED_HEIGHT);
    }

    #[test]
    fn test_clear_pole() {
        let set = categorized(&[
            (Category::Communication, "CATV", 222),
            (Category::Power, "PWR", 400),
        ]);
        let verdict = ClearanceEvaluator::default().evaluate(PoleKind::Joint, &set);
        assert_eq!(verdict.proposed_height, 234);
        assert!(!verdict.needs_make_ready);
        assert!(verdict.reasons.is_empty());
        assert_eq!(verdict.outcomes.len(), 5);
    }

    #[test]
    fn test_reasons_accumulate_in_check_order() {
        let set = categorized(&[
            (Category::Transformer, "TRANS BTM", 280),
            (Category::Power, "PWR", 300),
            (Category::StreetlightBottom, "STLT BTM", 260),
        ]);
        let verdict = ClearanceEvaluator::default().evaluate(PoleKind::Joint, &set);
        assert!(verdict.needs_make_ready);
        assert_eq!(
            verdict.reasons,
            vec![
                "PHOA is 6 inches above bottom of a street light.".to_string(),
                "PHOA within 34 inches from lowest power.".to_string(),
                "PHOA within 14 inches from bottom of lowest transformer.".to_string(),
            ]
        );
    }

    #[test]
    fn test_default_config_matches_explicit_defaults() {
        let set = categorized(&[(Category::Power, "PWR", 300)]);
        let explicit = ClearanceConfig::new()
            .with_power_clearance(40)
            .with_circuit_clearance(12)
            .with_streetlight_bottom_clearance(4)
            .with_transformer_clearance(30);
        assert_eq!(
            ClearanceEvaluator::default().evaluate(PoleKind::Joint, &set),
            ClearanceEvaluator::new(explicit).evaluate(PoleKind::Joint, &set)
        );
    }
}
