//! Attachment parsing, classification and aggregation.
//!
//! The pipeline for one pole record is:
//!
//! 1. [`parse_cell`] turns each relevant cell into [`AttachmentToken`]s.
//! 2. [`AttachmentClassifier`] assigns every token exactly one [`Category`]
//!    using the column family, the pole type and the keyword sets in
//!    [`keywords`].
//! 3. [`CategorizedAttachments`] groups the classified tokens per category and
//!    selects each category's binding member.

mod aggregate;
mod classifier;
pub mod keywords;
mod token;

pub use aggregate::{
    highest, lowest_nonzero, Attachment, CategorizedAttachments, CategorySet, ExtremumKind,
};
pub use classifier::{
    classify_name, is_blank_column, rules_for, AttachmentClassifier, Category,
    ClassificationRule, ClassifiedToken, ColumnFamily, COMMUNICATION_RULES, JOINT_POLE_RULES,
    TELEPHONE_POLE_RULES,
};
pub use keywords::KeywordSet;
pub use token::{parse_cell, parse_height, AttachmentToken, Inches, INCHES_PER_FOOT};
