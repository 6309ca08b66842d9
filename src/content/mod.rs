//! Document parsing.
//!
//! Turns one source file into `{ front_matter, content, excerpt }`. Front matter
//! stays untyped here; the `schema` module decides what it means.
//!
//! # Pipeline
//!
//! ```text
//! file ──► read ──► split front matter ──► body ──► derive excerpt
//!                         │
//!                         └──► YAML mapping (FrontMatter)
//! ```

mod excerpt;
mod frontmatter;
mod markdown;

pub use excerpt::{ELLIPSIS, EXCERPT_LENGTH, derive_excerpt};
pub use frontmatter::FrontMatter;
pub use markdown::{DEFAULT_CLASS_PREFIX, MarkdownRenderer, render_to_html};

use crate::error::{ContentError, Result};
use std::{fs, io::ErrorKind, path::Path};

/// A parsed source document, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub front_matter: FrontMatter,
    /// Raw markdown body
    pub content: String,
    /// Excerpt derived from the body
    pub excerpt: String,
}

/// Read and parse a document file.
///
/// Fails with [`ContentError::NotFound`] when `path` does not exist.
pub fn parse_file(path: &Path) -> Result<ParsedDocument> {
    let source = fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => ContentError::NotFound(path.to_path_buf()),
        _ => ContentError::Io(path.to_path_buf(), err),
    })?;
    parse_str(&source, path)
}

/// Parse document text. `path` only labels errors.
pub fn parse_str(source: &str, path: &Path) -> Result<ParsedDocument> {
    let (front_matter, body) = frontmatter::split(source, path)?;
    Ok(ParsedDocument {
        front_matter,
        excerpt: derive_excerpt(body),
        content: body.to_owned(),
    })
}
