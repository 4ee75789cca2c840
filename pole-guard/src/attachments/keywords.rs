//! Abbreviation matching for attachment names.
//!
//! Attachment names are abbreviations typed by field crews, so categories are
//! recognized by case-insensitive substring tests against small keyword sets.

use std::fmt;

/// A named set of abbreviations identifying one kind of attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordSet {
    name: &'static str,
    keywords: &'static [&'static str],
}

impl KeywordSet {
    /// Creates a keyword set. Keywords must be lower case.
    pub const fn new(name: &'static str, keywords: &'static [&'static str]) -> Self {
        Self { name, keywords }
    }

    /// Returns the name of the set.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the keywords in the set.
    pub fn keywords(&self) -> &'static [&'static str] {
        self.keywords
    }

    /// Returns true if any keyword occurs in `name`.
    pub fn matches_any(&self, name: &str) -> bool {
        matches_any(name, self.keywords)
    }

    /// Returns true only if no keyword occurs in `name`.
    pub fn misses_all(&self, name: &str) -> bool {
        misses_all(name, self.keywords)
    }
}

impl fmt::Display for KeywordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{{}}}", self.name, self.keywords.join(","))
    }
}

/// Returns true if any keyword is a case-insensitive substring of `name`.
pub fn matches_any(name: &str, keywords: &[&str]) -> bool {
    let name = name.to_lowercase();
    keywords
        .iter()
        .any(|keyword| name.contains(&keyword.to_lowercase()))
}

/// Returns true if every keyword is absent from `name` (case-insensitive).
pub fn misses_all(name: &str, keywords: &[&str]) -> bool {
    !matches_any(name, keywords)
}

pub const POWER: KeywordSet = KeywordSet::new("power", &["p", "s", "n"]);
pub const PRIMARY: KeywordSet = KeywordSet::new("primary", &["p"]);
pub const STREETLIGHT: KeywordSet = KeywordSet::new("streetlight", &["strl", "stl", "stlt"]);
pub const TRAFFIC_CIRCUIT: KeywordSet = KeywordSet::new(
    "traffic_circuit",
    &["trfccrt", "tcir", "traffic", "trcir", "trccir", "trf"],
);
pub const BOTTOM: KeywordSet = KeywordSet::new("bottom", &["btm", "bottom"]);
pub const DRIP_LOOP: KeywordSet = KeywordSet::new("drip_loop", &["dl", "drip"]);
pub const TRANSFORMER: KeywordSet = KeywordSet::new(
    "transformer",
    &["transformer", "trans", "trns", "tdl", "trans dl"],
);
pub const POLE_TAG: KeywordSet = KeywordSet::new("pole_tag", &["pltg", "tg", "pl", "tag"]);
pub const POLE_HEIGHT: KeywordSet =
    KeywordSet::new("pole_height", &["plht", "pl ht", "pole height", "pole ht"]);
