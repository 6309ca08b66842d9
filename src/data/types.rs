//! The capability interface the query engine works against.
//!
//! Every content type is its own record; generic operations (filter, sort,
//! search, related) only need the handful of accessors on [`Document`].

use crate::utils::date::Timestamp;
use std::sync::Arc;

/// A field read by name, for sorting and text search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(&'a [String]),
    Number(f64),
    Date(Timestamp),
    Bool(bool),
}

impl FieldValue<'_> {
    /// Whether `needle` (already lowercased) occurs in a text or list value.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        match self {
            Self::Text(text) => text.to_lowercase().contains(needle),
            Self::List(items) => items.iter().any(|item| item.to_lowercase().contains(needle)),
            _ => false,
        }
    }
}

/// A loaded content document.
pub trait Document {
    /// Unique within its collection; derived from the file name.
    fn slug(&self) -> &str;

    fn title(&self) -> &str;

    /// `None` only for types where the date is optional (members).
    fn date(&self) -> Option<Timestamp>;

    fn tags(&self) -> &[String];

    fn featured(&self) -> bool;

    fn excerpt(&self) -> &str;

    /// Raw markdown body.
    fn content(&self) -> &str;

    /// Author names, for author filtering. Empty for types without authors.
    fn authors(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Sub-type label, for `type` filtering (publications).
    fn kind(&self) -> Option<&str> {
        None
    }

    /// Manual sort position (members).
    fn order(&self) -> Option<f64> {
        None
    }

    /// Look a field up by its front-matter name (`"title"`, `"endDate"`, ...).
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// Base lookups shared by every type's [`Document::field`].
pub(crate) fn base_field<'a, D: Document + ?Sized>(doc: &'a D, name: &str) -> Option<FieldValue<'a>> {
    Some(match name {
        "slug" => FieldValue::Text(doc.slug()),
        "title" => FieldValue::Text(doc.title()),
        "date" => FieldValue::Date(doc.date()?),
        "tags" => FieldValue::List(doc.tags()),
        "featured" => FieldValue::Bool(doc.featured()),
        "excerpt" => FieldValue::Text(doc.excerpt()),
        "content" => FieldValue::Text(doc.content()),
        _ => return None,
    })
}

impl<D: Document + ?Sized> Document for Arc<D> {
    fn slug(&self) -> &str {
        (**self).slug()
    }
    fn title(&self) -> &str {
        (**self).title()
    }
    fn date(&self) -> Option<Timestamp> {
        (**self).date()
    }
    fn tags(&self) -> &[String] {
        (**self).tags()
    }
    fn featured(&self) -> bool {
        (**self).featured()
    }
    fn excerpt(&self) -> &str {
        (**self).excerpt()
    }
    fn content(&self) -> &str {
        (**self).content()
    }
    fn authors(&self) -> Vec<&str> {
        (**self).authors()
    }
    fn kind(&self) -> Option<&str> {
        (**self).kind()
    }
    fn order(&self) -> Option<f64> {
        (**self).order()
    }
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        (**self).field(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_lowercase() {
        let tags = vec!["Cloud".to_string(), "IoT".to_string()];
        assert!(FieldValue::Text("Edge Computing").contains_lowercase("edge"));
        assert!(FieldValue::List(&tags).contains_lowercase("iot"));
        assert!(!FieldValue::List(&tags).contains_lowercase("ai"));
        assert!(!FieldValue::Number(3.0).contains_lowercase("3"));
    }
}
