//! Case-insensitive substring search over named fields.

use crate::data::Document;

/// Fields searched when the caller names none.
pub const DEFAULT_SEARCH_FIELDS: &[&str] = &["title", "content", "excerpt"];

/// Whether any of `fields` of `doc` contains `query`, ignoring case.
///
/// Text fields are tested directly, list fields element by element; other
/// field types never match. An empty query matches every document.
pub fn matches<D: Document, S: AsRef<str>>(doc: &D, query: &str, fields: &[S]) -> bool {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields.iter().any(|field| {
        doc.field(field.as_ref())
            .is_some_and(|value| value.contains_lowercase(&needle))
    })
}

/// Documents matching `query` on `fields` (or [`DEFAULT_SEARCH_FIELDS`] when
/// empty), in their original order.
pub fn search<D: Document + Clone, S: AsRef<str>>(items: &[D], query: &str, fields: &[S]) -> Vec<D> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }

    let hit = |doc: &D| {
        if fields.is_empty() {
            matches(doc, &needle, DEFAULT_SEARCH_FIELDS)
        } else {
            matches(doc, &needle, fields)
        }
    };
    items.iter().filter(|&doc| hit(doc)).cloned().collect()
}
