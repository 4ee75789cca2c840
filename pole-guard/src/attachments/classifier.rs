//! Attachment classification.
//!
//! Every parsed token is assigned to exactly one [`Category`]. The source
//! column decides which family of rules applies, and within a family the rules
//! are an ordered table: the first rule whose predicate accepts the name wins.
//!
//! ```text
//! column family        pole type   rules
//! ─────────────────    ─────────   ───────────────────────────────────────────
//! CM / CATV / TELCO    any         Communication
//! LWSTPWR / BLNK       telephone   TelPoleHeight
//! PLHT-like            telephone   TelPoleHeight
//! LWSTPWR / BLNK /     joint       StreetlightDripLoop, StreetlightBottom,
//! TRFCCRCT / TLT                   Circuit, Transformer, Power
//! ```
//!
//! Names no rule accepts are [`Category::Unclassified`] and take no part in
//! aggregation.

use super::keywords::{
    BOTTOM, DRIP_LOOP, POLE_HEIGHT, POLE_TAG, POWER, PRIMARY, STREETLIGHT, TRAFFIC_CIRCUIT,
    TRANSFORMER,
};
use super::token::{parse_cell, AttachmentToken, Inches};
use crate::core::{PoleKind, RawRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic category of an attachment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Power conductors, and transformer readings that are not bottoms
    Power,
    /// Bottom of a transformer
    Transformer,
    /// Traffic circuits
    Circuit,
    /// Street-light drip loops, treated as circuit-like obstacles
    StreetlightDripLoop,
    /// Bottom of a street-light fixture
    StreetlightBottom,
    /// Reported for completeness only. The rule tables file traffic
    /// circuits under `Circuit`, so this set always stays empty.
    TrafficCircuit,
    /// Height of a telephone-only pole
    TelPoleHeight,
    /// Communication lines (CATV, telco, unknown comm)
    Communication,
    /// Recognized by no rule
    Unclassified,
}

impl Category {
    /// Every category that is aggregated, in reporting order.
    pub const AGGREGATED: [Category; 8] = [
        Category::Power,
        Category::Transformer,
        Category::Circuit,
        Category::StreetlightDripLoop,
        Category::StreetlightBottom,
        Category::TrafficCircuit,
        Category::TelPoleHeight,
        Category::Communication,
    ];

    /// Returns the string representation of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Power => "power",
            Category::Transformer => "transformer",
            Category::Circuit => "circuit",
            Category::StreetlightDripLoop => "streetlight_drip_loop",
            Category::StreetlightBottom => "streetlight_bottom",
            Category::TrafficCircuit => "traffic_circuit",
            Category::TelPoleHeight => "tel_pole_height",
            Category::Communication => "communication",
            Category::Unclassified => "unclassified",
        }
    }

    /// Returns true if tokens of this category take part in aggregation.
    pub fn is_aggregated(&self) -> bool {
        !matches!(self, Category::Unclassified)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The family a column belongs to, derived from its header name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnFamily {
    /// `CM`, `CATV`, `TELCO` columns
    Communication,
    /// `LWSTPWR` and `BLNK` columns
    Power,
    /// `TRFCCRCT` and `TLT` columns
    Circuit,
    /// A dedicated pole-height column such as `PLHT`
    PoleHeight,
    /// Everything else (handles, owners, comments, ...)
    Other,
}

impl ColumnFamily {
    /// Determines the family of a column header.
    pub fn of(column: &str) -> Self {
        let upper = column.trim().to_uppercase();
        if ["CM", "CATV", "TELCO"].iter().any(|m| upper.contains(m)) {
            ColumnFamily::Communication
        } else if ["LWSTPWR", "BLNK"].iter().any(|m| upper.contains(m)) {
            ColumnFamily::Power
        } else if ["TRFCCRCT", "TLT"].iter().any(|m| upper.contains(m)) {
            ColumnFamily::Circuit
        } else if POLE_HEIGHT.matches_any(&upper) {
            ColumnFamily::PoleHeight
        } else {
            ColumnFamily::Other
        }
    }

    /// Returns true if cells of this family are parsed on a pole of `kind`.
    pub fn is_scanned(&self, kind: PoleKind) -> bool {
        match (self, kind) {
            (ColumnFamily::Communication, _) => true,
            (ColumnFamily::Power, _) => true,
            (ColumnFamily::Circuit, PoleKind::Joint) => true,
            (ColumnFamily::PoleHeight, PoleKind::Telephone) => true,
            _ => false,
        }
    }
}

/// Returns true for the ambiguous "blank" column, whose readings may carry
/// any kind of attachment.
pub fn is_blank_column(column: &str) -> bool {
    column.to_uppercase().contains("BLNK")
}

/// One entry of a classification rule table.
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    /// Category assigned when the predicate accepts a name
    pub category: Category,
    /// Short description used in logs
    pub description: &'static str,
    predicate: fn(&str) -> bool,
}

impl ClassificationRule {
    const fn new(category: Category, description: &'static str, predicate: fn(&str) -> bool) -> Self {
        Self {
            category,
            description,
            predicate,
        }
    }

    /// Returns true if the rule accepts `name`.
    pub fn accepts(&self, name: &str) -> bool {
        (self.predicate)(name)
    }
}

impl fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("category", &self.category)
            .field("description", &self.description)
            .finish()
    }
}

// A street light, traffic circuit or bottom reading that is neither a pole tag
// nor part of a transformer.
fn is_streetlight_or_circuit(name: &str) -> bool {
    (STREETLIGHT.matches_any(name)
        || TRAFFIC_CIRCUIT.matches_any(name)
        || BOTTOM.matches_any(name))
        && POLE_TAG.misses_all(name)
        && TRANSFORMER.misses_all(name)
}

// Bottom readings carrying the primary marker belong to power lines.
fn is_streetlight_fixture(name: &str) -> bool {
    STREETLIGHT.matches_any(name) || (BOTTOM.matches_any(name) && PRIMARY.misses_all(name))
}

fn is_power_like(name: &str) -> bool {
    (POWER.matches_any(name) || TRANSFORMER.matches_any(name))
        && STREETLIGHT.misses_all(name)
        && TRAFFIC_CIRCUIT.misses_all(name)
        && POLE_TAG.misses_all(name)
}

/// Rules for power and circuit columns of joint poles, in precedence order.
pub const JOINT_POLE_RULES: &[ClassificationRule] = &[
    ClassificationRule::new(
        Category::StreetlightDripLoop,
        "street light with drip loop",
        |n| is_streetlight_or_circuit(n) && is_streetlight_fixture(n) && DRIP_LOOP.matches_any(n),
    ),
    ClassificationRule::new(
        Category::StreetlightBottom,
        "street light bottom",
        |n| is_streetlight_or_circuit(n) && is_streetlight_fixture(n),
    ),
    ClassificationRule::new(
        Category::Circuit,
        "traffic circuit",
        |n| is_streetlight_or_circuit(n) && TRAFFIC_CIRCUIT.matches_any(n),
    ),
    ClassificationRule::new(
        Category::Transformer,
        "transformer bottom",
        |n| is_power_like(n) && BOTTOM.matches_any(n) && TRANSFORMER.matches_any(n),
    ),
    ClassificationRule::new(Category::Power, "power", is_power_like),
];

/// Rules for power and pole-height columns of telephone poles.
pub const TELEPHONE_POLE_RULES: &[ClassificationRule] = &[ClassificationRule::new(
    Category::TelPoleHeight,
    "telephone pole height",
    |n| POLE_HEIGHT.matches_any(n),
)];

/// Rules for communication columns.
pub const COMMUNICATION_RULES: &[ClassificationRule] = &[ClassificationRule::new(
    Category::Communication,
    "communication",
    |_| true,
)];

/// Returns the rule table for a column family on a pole of `kind`.
pub fn rules_for(family: ColumnFamily, kind: PoleKind) -> &'static [ClassificationRule] {
    if !family.is_scanned(kind) {
        return &[];
    }
    match (family, kind) {
        (ColumnFamily::Communication, _) => COMMUNICATION_RULES,
        (_, PoleKind::Telephone) => TELEPHONE_POLE_RULES,
        (_, PoleKind::Joint) => JOINT_POLE_RULES,
    }
}

/// Classifies a single name found in a column of the given family.
///
/// # Examples
///
/// ```rust
/// use pole_guard::attachments::{classify_name, Category, ColumnFamily};
/// use pole_guard::core::PoleKind;
///
/// assert_eq!(
///     classify_name("STLT DL", ColumnFamily::Circuit, PoleKind::Joint),
///     Category::StreetlightDripLoop
/// );
/// assert_eq!(
///     classify_name("TRANS BTM", ColumnFamily::Power, PoleKind::Joint),
///     Category::Transformer
/// );
/// assert_eq!(
///     classify_name("CATV", ColumnFamily::Communication, PoleKind::Telephone),
///     Category::Communication
/// );
/// ```
pub fn classify_name(name: &str, family: ColumnFamily, kind: PoleKind) -> Category {
    rules_for(family, kind)
        .iter()
        .find(|rule| rule.accepts(name))
        .map(|rule| rule.category)
        .unwrap_or(Category::Unclassified)
}

/// A parsed token together with its source column and category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedToken {
    /// Header of the column the token was read from
    pub column: String,
    /// Name used for display; may carry a column prefix
    pub name: String,
    /// Height above ground, `None` when unreadable
    pub height: Option<Inches>,
    /// Assigned category
    pub category: Category,
    /// The reading had no name of its own and was named after its column
    #[serde(default)]
    pub unnamed: bool,
}

/// Runs the parser and the rule tables over every relevant column of a record.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttachmentClassifier;

impl AttachmentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classifies every token of every scanned column, in column order.
    pub fn classify_record(&self, record: &RawRecord) -> Vec<ClassifiedToken> {
        let kind = record.pole_kind();
        let mut classified = Vec::new();

        for (column, value) in record.cells() {
            let family = ColumnFamily::of(column);
            if !family.is_scanned(kind) {
                continue;
            }

            classified.extend(
                parse_cell(value)
                    .into_iter()
                    .map(|token| self.classify_token(column, family, kind, token)),
            );
        }

        classified
    }

    fn classify_token(
        &self,
        column: &str,
        family: ColumnFamily,
        kind: PoleKind,
        token: AttachmentToken,
    ) -> ClassifiedToken {
        let unnamed = token.is_unnamed();
        let name = if unnamed {
            column.trim().to_uppercase()
        } else {
            token.name
        };
        let category = classify_name(&name, family, kind);
        let name = display_name(column, name, category);

        ClassifiedToken {
            column: column.to_string(),
            name,
            height: token.height,
            category,
            unnamed,
        }
    }
}

// Bottom readings say which fixture they belong to only through their column.
fn display_name(column: &str, name: String, category: Category) -> String {
    let column = column.trim().to_uppercase();
    if category == Category::StreetlightBottom && BOTTOM.matches_any(&name) && !name.contains(&column)
    {
        format!("{column} {name}")
    } else {
        name
    }
}
