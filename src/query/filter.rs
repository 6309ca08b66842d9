//! Filter criteria. All criteria that are set must hold (AND); unset ones are
//! ignored.

use crate::data::Document;
use crate::utils::date::Timestamp;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// Keep documents carrying at least one of these tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    /// Inclusive lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<Timestamp>,
    /// Inclusive upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<Timestamp>,
    /// Case-insensitive substring of any author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Exact sub-type, e.g. a publication `type`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn date_from(mut self, from: Timestamp) -> Self {
        self.date_from = Some(from);
        self
    }

    pub fn date_to(mut self, to: Timestamp) -> Self {
        self.date_to = Some(to);
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// `true` when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
            && self.featured.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.author.is_none()
            && self.kind.is_none()
    }

    pub fn matches<D: Document>(&self, doc: &D) -> bool {
        if !self.tags.is_empty() && !doc.tags().iter().any(|t| self.tags.contains(t)) {
            return false;
        }

        if self.featured.is_some_and(|featured| doc.featured() != featured) {
            return false;
        }

        if self.date_from.is_some() || self.date_to.is_some() {
            let Some(date) = doc.date() else {
                return false;
            };
            if self.date_from.is_some_and(|from| date < from)
                || self.date_to.is_some_and(|to| date > to)
            {
                return false;
            }
        }

        if let Some(author) = &self.author {
            let needle = author.to_lowercase();
            if !doc
                .authors()
                .iter()
                .any(|a| a.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        match &self.kind {
            Some(kind) => doc.kind() == Some(kind.as_str()),
            None => true,
        }
    }
}

/// Documents of `items` that match `filter`, in their original order.
pub fn filter<D: Document + Clone>(items: &[D], filter: &Filter) -> Vec<D> {
    if filter.is_empty() {
        return items.to_vec();
    }
    items.iter().filter(|d| filter.matches(*d)).cloned().collect()
}
