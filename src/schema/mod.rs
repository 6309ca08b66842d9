//! Per-content-type schemas.
//!
//! Each content type is a concrete record produced directly from front matter:
//!
//! | Type | Required beyond the base fields |
//! |------|---------------------------------|
//! | [`Event`] | `location`, `description` |
//! | [`BlogPost`] | `author`, `excerpt` |
//! | [`Member`] | `name`, `title`, `affiliation`, `bio`, `photo` (no base fields) |
//! | [`Publication`] | `authors`, `journal`, `abstract` |
//!
//! Validation never stops at the first problem: every failing field is reported
//! in a single [`ValidationFailed`].

mod blog;
mod event;
mod fields;
mod member;
mod publication;

pub use blog::BlogPost;
pub use event::{Event, ProgramItem, Speaker};
pub use member::{Member, SocialLink};
pub use publication::{Publication, PublicationType};

use crate::content::FrontMatter;
use crate::data::Document;
use crate::utils::date::Timestamp;
use fields::Fields;
use serde::Serialize;
use std::fmt;

// ============================================================================
// Validation Errors
// ============================================================================

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Dotted path to the field, e.g. `speakers.1.name`
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every field-level failure of one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationFailed {
    issues: Vec<ValidationIssue>,
}

impl ValidationFailed {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Whether any issue is reported for `path`.
    pub fn has_issue(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| issue.path == path)
    }
}

impl From<Vec<ValidationIssue>> for ValidationFailed {
    fn from(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }
}

impl fmt::Display for ValidationFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailed {}

// ============================================================================
// Schema Trait
// ============================================================================

/// Values the loader derives from the file rather than the front matter.
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    /// File name without extension
    pub slug: String,
    /// Excerpt derived from the body
    pub excerpt: String,
    /// Raw markdown body
    pub content: String,
}

/// A content type that can be validated out of front matter.
pub trait Schema: Document + Serialize + Sized + Send + Sync + 'static {
    /// Collection name used in logs (`"events"`, `"blog"`, ...)
    const COLLECTION: &'static str;

    /// Coerce `record` into a typed document, merging in the derived values.
    fn validate(record: &FrontMatter, derived: &Derived) -> Result<Self, ValidationFailed>;
}

/// Fields shared by events, blog posts and publications.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseFields {
    pub slug: String,
    pub title: String,
    pub date: Timestamp,
    pub tags: Vec<String>,
    pub featured: bool,
    pub excerpt: String,
    pub content: String,
}

/// Where a record's excerpt comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExcerptRule {
    /// Front matter when present, otherwise derived from the body.
    Derived,
    /// Front matter only.
    Required,
}

impl BaseFields {
    /// Validate the base fields.
    fn validate(fields: &mut Fields<'_>, derived: &Derived, rule: ExcerptRule) -> Self {
        let title = fields.required_str("title", "Title is required");
        let date = fields.date("date");
        let tags = fields.tags();
        let featured = fields.bool_or("featured", false);
        let excerpt = match rule {
            ExcerptRule::Required => fields.required_str("excerpt", "Excerpt is required"),
            ExcerptRule::Derived => fields
                .optional_str("excerpt")
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| derived.excerpt.clone()),
        };

        Self {
            slug: derived.slug.clone(),
            title,
            date: date.unwrap_or_else(Timestamp::epoch),
            tags,
            featured,
            excerpt,
            content: derived.content.clone(),
        }
    }
}
