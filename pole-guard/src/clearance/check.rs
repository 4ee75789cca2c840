//! The clearance check trait and its outcome types.

use crate::attachments::{Attachment, CategorizedAttachments, Inches};
use crate::config::ClearanceConfig;
use crate::core::PoleKind;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// The status of one clearance check on one pole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// The proposed attachment keeps enough distance
    Clear,
    /// The proposed attachment is too close to, or above, the obstacle
    MakeReady,
    /// The check did not apply (no obstacle of this kind, or wrong pole type)
    Skipped,
}

impl CheckStatus {
    pub fn is_clear(&self) -> bool {
        matches!(self, CheckStatus::Clear)
    }

    pub fn is_make_ready(&self) -> bool {
        matches!(self, CheckStatus::MakeReady)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, CheckStatus::Skipped)
    }
}

/// The result of evaluating one clearance check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Name of the check
    pub check: String,
    pub status: CheckStatus,
    /// The obstacle the check measured against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<Attachment>,
    /// Obstacle height minus proposed height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<Inches>,
    /// Threshold used for the decision
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Inches>,
    /// Make-ready reason, or the reason the check was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckOutcome {
    /// Creates a skipped outcome.
    pub fn skipped(check: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            status: CheckStatus::Skipped,
            binding: None,
            diff: None,
            threshold: None,
            message: Some(reason.into()),
        }
    }

    /// Returns the make-ready reason, if the check triggered.
    pub fn reason(&self) -> Option<&str> {
        if self.status.is_make_ready() {
            self.message.as_deref()
        } else {
            None
        }
    }
}

/// How a check names its obstacle in make-ready reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleWording {
    /// Used in "PHOA within N inches from ..."
    pub within: &'static str,
    /// Used in "PHOA is N inches above ..."
    pub above: &'static str,
}

impl ObstacleWording {
    pub const fn new(within: &'static str, above: &'static str) -> Self {
        Self { within, above }
    }

    /// Reason for an obstacle less than the threshold above the proposed height.
    pub fn within_message(&self, diff: Inches) -> String {
        format!("PHOA within {diff} inches from {}.", self.within)
    }

    /// Reason for an obstacle below the proposed height.
    pub fn above_message(&self, diff: Inches) -> String {
        format!("PHOA is {} inches above {}.", diff.unsigned_abs(), self.above)
    }
}

/// Classifies a height difference against a threshold.
///
/// ```rust
/// use pole_guard::clearance::{decide, CheckStatus};
///
/// assert_eq!(decide(34, 40), CheckStatus::MakeReady);
/// assert_eq!(decide(40, 40), CheckStatus::Clear);
/// assert_eq!(decide(-66, 40), CheckStatus::MakeReady);
/// assert_eq!(decide(0, 0), CheckStatus::Clear);
/// ```
pub fn decide(diff: Inches, threshold: Inches) -> CheckStatus {
    if diff < 0 || diff < threshold {
        CheckStatus::MakeReady
    } else {
        CheckStatus::Clear
    }
}

/// A single clearance rule evaluated against one pole.
///
/// Implementations are stateless; thresholds come from the
/// [`ClearanceConfig`] passed to [`ClearanceCheck::evaluate`].
///
/// # Examples
///
/// ```rust
/// use pole_guard::attachments::{Attachment, CategorizedAttachments, Category, Inches};
/// use pole_guard::clearance::{ClearanceCheck, ObstacleWording};
/// use pole_guard::config::ClearanceConfig;
///
/// #[derive(Debug)]
/// struct GuyWireCheck;
///
/// impl ClearanceCheck for GuyWireCheck {
///     fn name(&self) -> &str {
///         "guy_wire"
///     }
///
///     fn threshold(&self, _config: &ClearanceConfig) -> Inches {
///         6
///     }
///
///     fn binding<'a>(&self, categorized: &'a CategorizedAttachments) -> Option<&'a Attachment> {
///         categorized.extremum(Category::Power)
///     }
///
///     fn wording(&self) -> ObstacleWording {
///         ObstacleWording::new("guy wire", "a guy wire")
///     }
/// }
/// ```
pub trait ClearanceCheck: Debug + Send + Sync {
    /// Returns the name of the check.
    fn name(&self) -> &str;

    /// Returns true if the check runs on poles of this kind.
    fn applies_to(&self, _kind: PoleKind) -> bool {
        true
    }

    /// Threshold in inches under the given configuration.
    fn threshold(&self, config: &ClearanceConfig) -> Inches;

    /// The obstacle to measure against, if the pole has one.
    fn binding<'a>(&self, categorized: &'a CategorizedAttachments) -> Option<&'a Attachment>;

    /// How the obstacle is named in reasons.
    fn wording(&self) -> ObstacleWording;

    /// Evaluates the check for a pole with the given proposed height.
    fn evaluate(
        &self,
        kind: PoleKind,
        categorized: &CategorizedAttachments,
        proposed_height: Inches,
        config: &ClearanceConfig,
    ) -> CheckOutcome {
        if !self.applies_to(kind) {
            return CheckOutcome::skipped(self.name(), format!("Not applicable to {kind} poles"));
        }
        let Some(binding) = self.binding(categorized) else {
            return CheckOutcome::skipped(self.name(), "No obstacle recorded");
        };

        let threshold = self.threshold(config);
        let diff = binding.height.saturating_sub(proposed_height);
        let status = decide(diff, threshold);
        let message = match status {
            CheckStatus::MakeReady if diff < 0 => Some(self.wording().above_message(diff)),
            CheckStatus::MakeReady => Some(self.wording().within_message(diff)),
            _ => None,
        };

        CheckOutcome {
            check: self.name().to_string(),
            status,
            binding: Some(binding.clone()),
            diff: Some(diff),
            threshold: Some(threshold),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decide_boundaries() {
        assert_eq!(decide(0, 4), CheckStatus::MakeReady);
        assert_eq!(decide(3, 4), CheckStatus::MakeReady);
        assert_eq!(decide(4, 4), CheckStatus::Clear);
        assert_eq!(decide(-1, 4), CheckStatus::MakeReady);
        assert_eq!(decide(-1, 0), CheckStatus::MakeReady);
        assert_eq!(decide(274, 4), CheckStatus::Clear);
    }

    #[test]
    fn test_wording() {
        let wording = ObstacleWording::new("lowest power", "lowest power");
        assert_eq!(
            wording.within_message(34),
            "PHOA within 34 inches from lowest power."
        );
        assert_eq!(
            wording.above_message(-66),
            "PHOA is 66 inches above lowest power."
        );
    }

    #[test]
    fn test_reason_only_for_make_ready() {
        let skipped = CheckOutcome::skipped("power", "No obstacle recorded");
        assert!(skipped.status.is_skipped());
        assert_eq!(skipped.reason(), None);
    }
}
