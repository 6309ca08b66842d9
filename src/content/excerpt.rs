//! Plain-text excerpts derived from markdown bodies.

use regex::Regex;
use std::sync::LazyLock;

/// Maximum number of visible characters in a derived excerpt.
pub const EXCERPT_LENGTH: usize = 200;

/// Marker appended when the excerpt was cut short.
pub const ELLIPSIS: &str = "...";

static RE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#+[ \t]+").expect("heading pattern is valid"));
static RE_BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));
static RE_ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("italic pattern is valid"));
static RE_INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(.*?)`").expect("inline code pattern is valid"));

/// Derive an excerpt from a markdown body.
///
/// Heading markers, bold, italic and inline-code markup are stripped, every
/// whitespace run collapses to a single space, and the result is cut to
/// [`EXCERPT_LENGTH`] characters. [`ELLIPSIS`] is appended only when the
/// cleaned text was longer than that.
pub fn derive_excerpt(body: &str) -> String {
    let cleaned = strip_markup(body);
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    match cleaned.char_indices().nth(EXCERPT_LENGTH) {
        None => cleaned,
        Some((cut, _)) => format!("{}{ELLIPSIS}", cleaned[..cut].trim_end()),
    }
}

fn strip_markup(body: &str) -> String {
    let text = RE_HEADING.replace_all(body, "");
    let text = RE_BOLD.replace_all(&text, "$1");
    let text = RE_ITALIC.replace_all(&text, "$1");
    RE_INLINE_CODE.replace_all(&text, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible_len(excerpt: &str) -> usize {
        excerpt.strip_suffix(ELLIPSIS).unwrap_or(excerpt).chars().count()
    }

    #[test]
    fn test_strips_headings_and_emphasis() {
        let body = "# Title\n\nSome **bold** and *italic* with `code`.\n## Next";
        assert_eq!(derive_excerpt(body), "Title Some bold and italic with code. Next");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(derive_excerpt("  a\n\n\tb   c \r\n"), "a b c");
    }

    #[test]
    fn test_hash_without_space_is_kept() {
        assert_eq!(derive_excerpt("#hashtag stays"), "#hashtag stays");
    }

    #[test]
    fn test_short_body_has_no_ellipsis() {
        let body = "x".repeat(EXCERPT_LENGTH);
        let excerpt = derive_excerpt(&body);
        assert_eq!(excerpt.len(), EXCERPT_LENGTH);
        assert!(!excerpt.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "word ".repeat(100);
        let excerpt = derive_excerpt(&body);
        assert!(excerpt.ends_with(ELLIPSIS));
        assert!(visible_len(&excerpt) <= EXCERPT_LENGTH);
        // Trailing space before the cut is trimmed
        assert!(!excerpt.contains(" ..."));
    }

    #[test]
    fn test_markup_does_not_count_towards_length() {
        // 190 visible chars wrapped in bold markup stays under the limit
        let body = format!("**{}**", "y".repeat(190));
        let excerpt = derive_excerpt(&body);
        assert_eq!(excerpt.chars().count(), 190);
        assert!(!excerpt.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_multibyte_characters_counted_as_chars() {
        let body = "é".repeat(250);
        let excerpt = derive_excerpt(&body);
        assert_eq!(visible_len(&excerpt), EXCERPT_LENGTH);
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(derive_excerpt(""), "");
        assert_eq!(derive_excerpt("\n\n  \n"), "");
    }

    #[test]
    fn test_excerpt_bound_holds_for_varied_bodies() {
        let bodies = [
            "# H\n".repeat(80),
            "*a* **b** `c` ".repeat(40),
            "line\n".repeat(300),
            "漢字".repeat(150),
        ];
        for body in bodies {
            assert!(visible_len(&derive_excerpt(&body)) <= EXCERPT_LENGTH);
        }
    }
}
