//! Clearance configuration and custom clearance checks.
//!
//! This example shows how to:
//! - Load clearance thresholds from TOML and override single values in code
//! - Add a project-specific check next to the standard ones
//! - Read per-check outcomes, including skipped checks
//!
//! Run with:
//! ```bash
//! cargo run -p pole-demos --example custom_clearance
//! ```

use pole_guard::attachments::{Attachment, CategorizedAttachments, Category};
use pole_guard::clearance::{ClearanceCheck, ObstacleWording};
use pole_guard::prelude::*;

const CONFIG: &str = r#"
[clearance]
power_clearance = 30
transformer_clearance = 24

[batch]
max_concurrency = 2
"#;

/// Keeps the new attachment at least 6 feet below the highest power reading.
#[derive(Debug)]
struct TopPowerCheck;

impl ClearanceCheck for TopPowerCheck {
    fn name(&self) -> &str {
        "top_power"
    }

    fn applies_to(&self, kind: PoleKind) -> bool {
        kind == PoleKind::Joint
    }

    fn threshold(&self, _config: &ClearanceConfig) -> Inches {
        72
    }

    fn binding<'a>(&self, categorized: &'a CategorizedAttachments) -> Option<&'a Attachment> {
        categorized
            .get(Category::Power)
            .and_then(|set| pole_guard::attachments::highest(set.members()))
    }

    fn wording(&self) -> ObstacleWording {
        ObstacleWording::new("highest power", "highest power")
    }
}

fn main() -> Result<()> {
    let config = AnalyzerConfig::from_toml_str(CONFIG)?;
    println!(
        "Clearances: power {}\", circuit {}\", street light {}\", transformer {}\"",
        config.clearance.power_clearance(),
        config.clearance.circuit_clearance(),
        config.clearance.streetlight_bottom_clearance(),
        config.clearance.transformer_clearance(),
    );

    let strict = config.clearance.with_power_clearance(48);
    let pole = RawRecord::builder("2001")
        .cell("TYPE", "JNT")
        .cell("LWSTPWR", "PWR 22 6/PRI 25 0")
        .cell("BLNK", "TRANS BTM 22 0")
        .cell("CATV", "CATV 18 6")
        .build();

    for (label, clearance) in [("file", config.clearance), ("strict", strict)] {
        let analyzer = PoleAnalyzer::new(clearance).with_check(Box::new(TopPowerCheck));
        let result = analyzer.analyze(&pole);

        println!("\n[{label}] pole {} PHOA {}\"", result.pole_handle, result.proposed_height);
        for outcome in &result.outcomes {
            let detail = match (&outcome.binding, outcome.diff) {
                (Some(binding), Some(diff)) => format!("{} at {}\" (diff {diff}\")", binding.name, binding.height),
                _ => outcome.message.clone().unwrap_or_default(),
            };
            println!("  {:<20} {:?} {}", outcome.check, outcome.status, detail);
        }
        print!("{}", result.mr_text());
    }

    Ok(())
}
