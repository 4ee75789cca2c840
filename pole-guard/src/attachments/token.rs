//! Height token parsing for raw attachment cells.
//!
//! Field crews record attachment heights as free text: `"22 2"`, `"12'6\""`,
//! `"CATV 18 6"` or several co-located attachments in one cell separated by
//! `/` (`"CATV 18 6/TELCO 15 0"`). This module turns one such cell into
//! [`AttachmentToken`]s with the height converted to inches.
//!
//! The numeric part of a segment is read as feet and inches in two-character
//! chunks; when there are exactly three chunks the third continues the
//! inches, so `"25 10"` is 25'10". With more chunks only the second counts.
//! Unreadable numbers never raise: the token keeps an undefined height and
//! is dropped before aggregation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Heights and clearance distances, in inches.
pub type Inches = i32;

/// Inches per foot.
pub const INCHES_PER_FOOT: Inches = 12;

static NAME_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[0-9'"/]+"#).expect("valid regex"));
static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^ 0-9]+").expect("valid regex"));

/// One attachment reading parsed from a cell.
///
/// `name` is upper-cased with digits and quote characters removed. It is empty
/// when the cell held nothing but a height; the classifier substitutes the
/// source column name in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentToken {
    /// Normalized attachment name
    pub name: String,
    /// Height above ground, or `None` when the numeric part was unreadable
    pub height: Option<Inches>,
}

impl AttachmentToken {
    /// Creates a token from an already normalized name.
    pub fn new(name: impl Into<String>, height: Option<Inches>) -> Self {
        Self {
            name: name.into(),
            height,
        }
    }

    /// Returns true when the cell carried no attachment name.
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }
}

/// Parses one raw cell into its attachment tokens.
///
/// Blank cells yield no tokens. Every other cell yields at least one.
///
/// # Examples
///
/// ```rust
/// use pole_guard::attachments::{parse_cell, AttachmentToken};
///
/// assert_eq!(parse_cell("22 2"), vec![AttachmentToken::new("", Some(266))]);
/// assert_eq!(
///     parse_cell("CATV 18 6/TELCO 15 0"),
///     vec![
///         AttachmentToken::new("CATV", Some(222)),
///         AttachmentToken::new("TELCO", Some(180)),
///     ]
/// );
/// assert!(parse_cell("   ").is_empty());
/// ```
pub fn parse_cell(raw: &str) -> Vec<AttachmentToken> {
    let value = raw.trim();
    if value.is_empty() {
        return Vec::new();
    }

    if is_bare_height(value) {
        return vec![AttachmentToken::new("", parse_height(value))];
    }

    if value.contains('/') {
        value.split('/').map(parse_segment).collect()
    } else {
        vec![parse_segment(value)]
    }
}

/// Converts the numeric portion of a segment (digits and spaces) to inches.
///
/// Returns `None` when there is no feet chunk or a chunk is not a number.
/// A missing inches chunk counts as zero inches. A third chunk continues the
/// inches only when it is the last one.
///
/// ```rust
/// use pole_guard::attachments::parse_height;
///
/// assert_eq!(parse_height("22 2"), Some(266));
/// assert_eq!(parse_height("25 10"), Some(310));
/// assert_eq!(parse_height("25"), Some(300));
/// assert_eq!(parse_height(""), None);
/// ```
pub fn parse_height(numeric: &str) -> Option<Inches> {
    let chars: Vec<char> = numeric.trim().chars().collect();
    let chunks: Vec<String> = chars.chunks(2).map(|c| c.iter().collect()).collect();

    let feet = parse_chunk(chunks.first()?)?;
    let inches = match chunks.len() {
        1 => 0,
        3 => {
            let joined: String = format!("{}{}", chunks[1], chunks[2])
                .chars()
                .filter(|c| *c != ' ')
                .collect();
            parse_chunk(&joined)?
        }
        _ => parse_chunk(&chunks[1]).unwrap_or(0),
    };

    feet.checked_mul(INCHES_PER_FOOT)?.checked_add(inches)
}

fn parse_chunk(chunk: &str) -> Option<Inches> {
    let chunk = chunk.trim();
    if chunk.is_empty() {
        return None;
    }
    chunk.parse().ok()
}

fn parse_segment(segment: &str) -> AttachmentToken {
    let name = NAME_NOISE.replace_all(segment, "").trim().to_uppercase();
    let numeric = NON_NUMERIC.replace_all(segment.trim(), "");
    AttachmentToken::new(name, parse_height(&numeric))
}

fn is_bare_height(value: &str) -> bool {
    let mut digits = value.chars().filter(|c| *c != ' ').peekable();
    digits.peek().is_some() && digits.all(|c| c.is_ascii_digit())
}
