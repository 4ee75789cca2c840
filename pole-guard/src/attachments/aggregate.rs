//! Per-category aggregation of classified attachments.
//!
//! Each category collects its members as an ordered name → height list with
//! unique names, and selects one extremum: the lowest non-zero height for
//! obstacles, the highest height for communication lines and the last reading
//! for telephone pole heights. Ties always go to the earliest member.

use super::classifier::{is_blank_column, Category, ClassifiedToken};
use super::token::Inches;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a category selects its binding member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremumKind {
    /// Smallest height strictly above zero
    Min,
    /// Largest height
    Max,
    /// Last member in insertion order
    Last,
}

impl Category {
    /// Returns how the extremum of this category is selected.
    pub fn extremum_kind(&self) -> ExtremumKind {
        match self {
            Category::Communication => ExtremumKind::Max,
            Category::TelPoleHeight => ExtremumKind::Last,
            _ => ExtremumKind::Min,
        }
    }
}

/// A named height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub height: Inches,
}

impl Attachment {
    pub fn new(name: impl Into<String>, height: Inches) -> Self {
        Self {
            name: name.into(),
            height,
        }
    }
}

/// Returns the first member with the smallest height above zero.
///
/// ```rust
/// use pole_guard::attachments::{lowest_nonzero, Attachment};
///
/// let members = [
///     Attachment::new("A", 0),
///     Attachment::new("B", 240),
///     Attachment::new("C", 240),
/// ];
/// assert_eq!(lowest_nonzero(&members).map(|a| a.name.as_str()), Some("B"));
/// assert!(lowest_nonzero(&[Attachment::new("A", 0)]).is_none());
/// ```
pub fn lowest_nonzero<'a, I>(members: I) -> Option<&'a Attachment>
where
    I: IntoIterator<Item = &'a Attachment>,
{
    members
        .into_iter()
        .filter(|member| member.height > 0)
        .fold(None::<&'a Attachment>, |lowest, member| match lowest {
            Some(current) if current.height <= member.height => Some(current),
            _ => Some(member),
        })
}

/// Returns the first member with the largest height.
pub fn highest<'a, I>(members: I) -> Option<&'a Attachment>
where
    I: IntoIterator<Item = &'a Attachment>,
{
    members
        .into_iter()
        .fold(None::<&'a Attachment>, |highest, member| match highest {
            Some(current) if current.height >= member.height => Some(current),
            _ => Some(member),
        })
}

/// All members of one category plus its extremum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet {
    pub category: Category,
    members: Vec<Attachment>,
    extremum: Option<Attachment>,
}

impl CategorySet {
    /// Creates an empty set.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            members: Vec::new(),
            extremum: None,
        }
    }

    /// Adds a member, renaming it when the name is already taken.
    ///
    /// Returns the name the member was stored under.
    pub fn insert(&mut self, name: &str, height: Inches) -> String {
        let name = self.unique_name(name);
        self.members.push(Attachment::new(name.clone(), height));
        self.extremum = self.select_extremum().cloned();
        name
    }

    /// Returns true if a member with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name == name)
    }

    /// Returns the height stored under `name`.
    pub fn get(&self, name: &str) -> Option<Inches> {
        self.members
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.height)
    }

    /// Members in insertion order.
    pub fn members(&self) -> &[Attachment] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The binding member, if any.
    pub fn extremum(&self) -> Option<&Attachment> {
        self.extremum.as_ref()
    }

    /// Height of the binding member, if any.
    pub fn extremum_height(&self) -> Option<Inches> {
        self.extremum.as_ref().map(|a| a.height)
    }

    fn select_extremum(&self) -> Option<&Attachment> {
        match self.category.extremum_kind() {
            ExtremumKind::Min => lowest_nonzero(&self.members),
            ExtremumKind::Max => highest(&self.members),
            ExtremumKind::Last => self.members.last(),
        }
    }

    fn unique_name(&self, base: &str) -> String {
        if !self.contains(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}-{n}"))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}

/// Category sets for one pole, keyed by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorizedAttachments {
    sets: BTreeMap<Category, CategorySet>,
}

impl CategorizedAttachments {
    /// Builds the category sets from classified tokens.
    ///
    /// Tokens without a readable height and unclassified tokens are dropped.
    pub fn from_tokens<'a, I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a ClassifiedToken>,
    {
        let mut categorized = Self::default();
        for token in tokens {
            let Some(height) = token.height else {
                continue;
            };
            if !token.category.is_aggregated() {
                continue;
            }
            categorized.add(token, height);
        }
        categorized
    }

    fn add(&mut self, token: &ClassifiedToken, height: Inches) {
        let set = self
            .sets
            .entry(token.category)
            .or_insert_with(|| CategorySet::new(token.category));

        if token.unnamed && is_blank_column(&token.column) && set.contains(&token.name) {
            let prefixed = format!("{} {}", token.column.trim().to_uppercase(), token.name);
            set.insert(&prefixed, height);
        } else {
            set.insert(&token.name, height);
        }
    }

    /// Returns the set for a category, if it has members.
    pub fn get(&self, category: Category) -> Option<&CategorySet> {
        self.sets.get(&category)
    }

    /// Returns the binding member of a category.
    pub fn extremum(&self, category: Category) -> Option<&Attachment> {
        self.get(category).and_then(CategorySet::extremum)
    }

    /// Iterates over the non-empty sets in category order.
    pub fn iter(&self) -> impl Iterator<Item = &CategorySet> {
        self.sets.values()
    }

    /// Total number of aggregated attachments.
    pub fn attachment_count(&self) -> usize {
        self.sets.values().map(CategorySet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
