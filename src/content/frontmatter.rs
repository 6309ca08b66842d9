//! Front matter splitting.
//!
//! A document may open with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Edge Computing Workshop
//! date: 2024-05-02
//! tags: [edge, iot]
//! ---
//! Body text in markdown...
//! ```
//!
//! Files without an opening fence have empty front matter and the whole file
//! as body. An opening fence without a closing one is a parse failure.

use crate::error::{ContentError, Result};
use serde_yaml::{Mapping, Value};
use std::path::Path;

const FENCE: &str = "---";
/// YAML's document-end marker, also accepted as a closing fence
const DOCUMENT_END: &str = "...";

/// Untyped front matter record. Validation happens one layer up, in `schema`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter(Mapping);

impl FrontMatter {
    pub fn new(mapping: Mapping) -> Self {
        Self(mapping)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }
}

impl From<Mapping> for FrontMatter {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}

/// Split `source` into its front matter and markdown body.
///
/// `path` only labels errors.
pub fn split<'a>(source: &'a str, path: &Path) -> Result<(FrontMatter, &'a str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let Some(rest) = strip_fence_line(source) else {
        return Ok((FrontMatter::default(), source));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == FENCE || trimmed == DOCUMENT_END {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((parse_yaml(yaml, path)?, body));
        }
        offset += line.len();
    }

    Err(ContentError::UnterminatedFrontMatter(path.to_path_buf()))
}

/// Strip the opening `---` line, returning what follows it.
fn strip_fence_line(source: &str) -> Option<&str> {
    let rest = source.strip_prefix(FENCE)?;
    let (first_line, after) = match rest.find('\n') {
        Some(idx) => (&rest[..idx], &rest[idx + 1..]),
        None => (rest, ""),
    };
    // `----` or `--- title` is not a fence
    first_line.trim().is_empty().then_some(after)
}

fn parse_yaml(yaml: &str, path: &Path) -> Result<FrontMatter> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }

    let value: Value =
        serde_yaml::from_str(yaml).map_err(|source| ContentError::FrontMatter {
            path: path.to_path_buf(),
            source,
        })?;

    match value {
        Value::Null => Ok(FrontMatter::default()),
        Value::Mapping(mapping) => Ok(FrontMatter(mapping)),
        _ => Err(ContentError::InvalidFrontMatter(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> &'static Path {
        Path::new("test.md")
    }

    #[test]
    fn test_split_basic() {
        let source = "---\ntitle: Hello\ntags: [a, b]\n---\n# Body\n\nText\n";
        let (fm, body) = split(source, path()).unwrap();
        assert_eq!(fm.get("title").and_then(Value::as_str), Some("Hello"));
        assert_eq!(fm.get("tags").and_then(Value::as_sequence).map(Vec::len), Some(2));
        assert_eq!(body, "# Body\n\nText\n");
    }

    #[test]
    fn test_split_without_front_matter() {
        let source = "# Just a body\n";
        let (fm, body) = split(source, path()).unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, source);
    }

    #[test]
    fn test_split_empty_front_matter() {
        let (fm, body) = split("---\n---\nbody", path()).unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_crlf_line_endings() {
        let source = "---\r\ntitle: Hello\r\n---\r\nbody\r\n";
        let (fm, body) = split(source, path()).unwrap();
        assert_eq!(fm.get("title").and_then(Value::as_str), Some("Hello"));
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_split_document_end_marker() {
        let (fm, body) = split("---\ntitle: x\n...\nrest", path()).unwrap();
        assert!(fm.contains_key("title"));
        assert_eq!(body, "rest");
    }

    #[test]
    fn test_split_strips_bom() {
        let (fm, _) = split("\u{feff}---\ntitle: x\n---\n", path()).unwrap();
        assert!(fm.contains_key("title"));
    }

    #[test]
    fn test_horizontal_rule_is_not_a_fence() {
        let source = "----\ntitle: x\n----\n";
        let (fm, body) = split(source, path()).unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, source);
    }

    #[test]
    fn test_unterminated_front_matter() {
        let err = split("---\ntitle: x\nno closing fence\n", path()).unwrap_err();
        assert!(matches!(err, ContentError::UnterminatedFrontMatter(_)));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = split("---\ntitle: [unclosed\n---\n", path()).unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
    }

    #[test]
    fn test_non_mapping_front_matter() {
        let err = split("---\n- a\n- b\n---\n", path()).unwrap_err();
        assert!(matches!(err, ContentError::InvalidFrontMatter(_)));
    }

    #[test]
    fn test_body_keeps_inner_rules() {
        let source = "---\ntitle: x\n---\nabove\n\n---\n\nbelow\n";
        let (_, body) = split(source, path()).unwrap();
        assert_eq!(body, "above\n\n---\n\nbelow\n");
    }
}
