//! Content error types.
//!
//! Per-document failures during a bulk load are recovered by the loader (skip and
//! log). Everything else reaches the caller through [`ContentError`].

use crate::schema::ValidationFailed;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for content operations
pub type Result<T> = std::result::Result<T, ContentError>;

/// Errors raised while reading, validating or rendering documents
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("file not found: `{0}`")]
    NotFound(PathBuf),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed front matter in `{path}`")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("front matter in `{0}` is never closed")]
    UnterminatedFrontMatter(PathBuf),

    #[error("front matter in `{0}` is not a key-value mapping")]
    InvalidFrontMatter(PathBuf),

    #[error("content validation failed for `{file}`: {failure}")]
    Validation {
        file: PathBuf,
        failure: ValidationFailed,
    },

    #[error("slug `{slug}` in `{file}` is already taken by `{existing}`")]
    DuplicateSlug {
        slug: String,
        file: PathBuf,
        existing: PathBuf,
    },

    #[error("markdown rendering failed: {0}")]
    Render(String),
}

/// Coarse classification of a [`ContentError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentErrorKind {
    Validation,
    Parsing,
    Loading,
    Rendering,
}

impl ContentErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Parsing => "parsing",
            Self::Loading => "loading",
            Self::Rendering => "rendering",
        }
    }
}

impl ContentError {
    pub const fn kind(&self) -> ContentErrorKind {
        match self {
            Self::NotFound(_) | Self::Io(..) | Self::DuplicateSlug { .. } => ContentErrorKind::Loading,
            Self::FrontMatter { .. }
            | Self::UnterminatedFrontMatter(_)
            | Self::InvalidFrontMatter(_) => ContentErrorKind::Parsing,
            Self::Validation { .. } => ContentErrorKind::Validation,
            Self::Render(_) => ContentErrorKind::Rendering,
        }
    }

    /// `true` for errors that mean "the document does not exist".
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
