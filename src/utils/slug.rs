//! Slug derivation from source file names.
//!
//! The file name without its extension is the authoritative slug of a document:
//! `content/blog/edge-computing.md` → `edge-computing`.

use std::path::Path;

/// Characters that make a slug unusable in URLs and file paths
const FORBIDDEN_CHARS: &[char] = &[
    '<', '>', ':', '|', '?', '*', '#', '\\', '/', '(', ')', '[', ']', '\t', '\r', '\n', '"',
];

/// Derive the slug of a document file.
///
/// Returns `None` when the extension is not one of `extensions` (compared
/// case-insensitively) or when the stem is empty.
///
/// # Examples
///
/// | Path | extensions | slug |
/// |------|------------|------|
/// | `blog/hello.md` | `["md"]` | `Some("hello")` |
/// | `blog/hello.MD` | `["md"]` | `Some("hello")` |
/// | `blog/notes.txt` | `["md"]` | `None` |
/// | `blog/.md` | `["md"]` | `None` |
pub fn slug_from_path(path: &Path, extensions: &[String]) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    if !extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    (!stem.is_empty() && !stem.starts_with('.')).then(|| stem.to_owned())
}

/// Whether `slug` can be used as-is in a URL path segment and as a file stem.
pub fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug
            .chars()
            .any(|c| c.is_whitespace() || FORBIDDEN_CHARS.contains(&c))
}
