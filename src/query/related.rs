//! Related content by shared tags.

use crate::data::Document;

pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Up to `limit` documents sharing tags with the one at `slug`, most shared
/// tags first. Ties keep collection order.
///
/// The source document and documents sharing no tag are never returned. An
/// unknown slug or an untagged source yields an empty list.
pub fn related<D: Document + Clone>(items: &[D], slug: &str, limit: usize) -> Vec<D> {
    let Some(source) = items.iter().find(|d| d.slug() == slug) else {
        return Vec::new();
    };

    let mut tags: Vec<&str> = source.tags().iter().map(String::as_str).collect();
    tags.sort_unstable();
    tags.dedup();
    if tags.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &D)> = items
        .iter()
        .filter(|d| d.slug() != slug)
        .filter_map(|d| {
            let shared = tags
                .iter()
                .filter(|tag| d.tags().iter().any(|t| t == *tag))
                .count();
            (shared > 0).then_some((shared, d))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, d)| d.clone())
        .collect()
}
