//! The built-in clearance checks, in evaluation order.

use super::check::{ClearanceCheck, ObstacleWording};
use crate::attachments::{Attachment, CategorizedAttachments, Category, Inches};
use crate::config::ClearanceConfig;
use crate::core::PoleKind;

/// Fixed distance kept below the top of a telephone pole.
pub const POLE_TOP_CLEARANCE: Inches = 4;

/// Distance below the bottom of the lowest street-light fixture.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreetlightBottomCheck;

impl ClearanceCheck for StreetlightBottomCheck {
    fn name(&self) -> &str {
        "streetlight_bottom"
    }

    fn threshold(&self, config: &ClearanceConfig) -> Inches {
        config.streetlight_bottom_clearance()
    }

    fn binding<'a>(&self, categorized: &'a CategorizedAttachments) -> Option<&'a Attachment> {
        categorized.extremum(Category::StreetlightBottom)
    }

    fn wording(&self) -> ObstacleWording {
        ObstacleWording::new("bottom of a street light", "bottom of a street light")
    }
}

/// Distance below the lowest traffic circuit or street-light drip loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircuitCheck;

impl ClearanceCheck for CircuitCheck {
    fn name(&self) -> &str {
        "circuit"
    }

    fn threshold(&self, config: &ClearanceConfig) -> Inches {
        config.circuit_clearance()
    }

    fn binding<'a>(&self, categorized: &'a CategorizedAttachments) -> Option<&'a Attachment> {
        let circuit = categorized.extremum(Category::Circuit);
        let drip_loop = categorized.extremum(Category::StreetlightDripLoop);
        match (circuit, drip_loop) {
            (Some(c), Some(d)) if d.height < c.height => Some(d),
            (Some(c), _) => Some(c),
            (None, d) => d,
        }
    }

    fn wording(&self) -> ObstacleWording {
        ObstacleWording::new(
            "street light or traffic circuit",
            "a street light or traffic circuit",
        )
    }
}

/// Distance below the top of a telephone-only pole.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoleTopCheck;

impl ClearanceCheck for PoleTopCheck {
    fn name(&self) -> &str {
        "pole_top"
    }

    fn applies_to(&self, kind: PoleKind) -> bool {
        kind == PoleKind::Telephone
    }

    fn threshold(&self, _config: &ClearanceConfig) -> Inches {
        POLE_TOP_CLEARANCE
    }

    fn binding<'a>(&self, categorized: &'a CategorizedAttachments) -> Option<&'a Attachment> {
        categorized.extremum(Category::TelPoleHeight)
    }

    fn wording(&self) -> ObstacleWording {
        ObstacleWording::new("top of this pole", "the top of this pole")
    }
}

/// Distance below the lowest power attachment of a joint pole.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestPowerCheck;

impl ClearanceCheck for LowestPowerCheck {
    fn name(&self) -> &str {
        "lowest_power"
    }

    fn applies_to(&self, kind: PoleKind) -> bool {
        kind == PoleKind::Joint
    }

    fn threshold(&self, config: &ClearanceConfig) -> Inches {
        config.power_clearance()
    }

    fn binding<'a>(&self, categorized: &'a CategorizedAttachments) -> Option<&'a Attachment> {
        categorized.extremum(Category::Power)
    }

    fn wording(&self) -> ObstacleWording {
        ObstacleWording::new("lowest power", "lowest power")
    }
}

/// Distance below the bottom of the lowest transformer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformerBottomCheck;

impl ClearanceCheck for TransformerBottomCheck {
    fn name(&self) -> &str {
        "transformer_bottom"
    }

    fn threshold(&self, config: &ClearanceConfig) -> Inches {
        config.transformer_clearance()
    }

    fn binding<'a>(&self, categorized: &'a CategorizedAttachments) -> Option<&'a Attachment> {
        categorized.extremum(Category::Transformer)
    }

    fn wording(&self) -> ObstacleWording {
        ObstacleWording::new("bottom of lowest transformer", "bottom of lowest transformer")
    }
}

/// The standard checks in the order their reasons are reported.
pub fn standard_checks() -> Vec<Box<dyn ClearanceCheck>> {
    vec![
        Box::new(StreetlightBottomCheck),
        Box::new(CircuitCheck),
        Box::new(PoleTopCheck),
        Box::new(LowestPowerCheck),
        Box::new(TransformerBottomCheck),
    ]
}
