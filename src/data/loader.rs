//! Collection loading.
//!
//! Enumerates the document files of one collection directory, parses and
//! validates them in parallel, and keeps going when a single file is broken:
//! every failure is logged and reported in the [`LoadReport`], never raised.

use super::Document;
use crate::content;
use crate::error::{ContentError, ContentErrorKind, Result};
use crate::log;
use crate::schema::{Derived, Schema};
use crate::utils::slug::{is_url_safe, slug_from_path};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::{
    io,
    marker::PhantomData,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// One document that was skipped during a bulk load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub file: PathBuf,
    #[serde(serialize_with = "serialize_kind")]
    pub kind: ContentErrorKind,
    pub message: String,
}

fn serialize_kind<S: serde::Serializer>(kind: &ContentErrorKind, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(kind.as_str())
}

impl LoadFailure {
    fn new(file: PathBuf, error: &ContentError) -> Self {
        Self {
            file,
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Outcome of loading a whole collection.
#[derive(Debug)]
pub struct LoadReport<D> {
    /// Valid documents, in file-name order.
    pub documents: Vec<D>,
    pub failures: Vec<LoadFailure>,
}

impl<D> Default for LoadReport<D> {
    fn default() -> Self {
        Self {
            documents: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// Loads the documents of one content type from one directory.
#[derive(Debug, Clone)]
pub struct CollectionLoader<D> {
    dir: PathBuf,
    extensions: Vec<String>,
    _schema: PhantomData<fn() -> D>,
}

impl<D: Schema> CollectionLoader<D> {
    pub fn new(dir: impl Into<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            extensions,
            _schema: PhantomData,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Document files directly inside the collection directory, sorted by path.
    ///
    /// Subdirectories and files with other extensions are ignored. A missing
    /// directory yields an empty list.
    pub fn source_files(&self) -> io::Result<Vec<PathBuf>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(io::Error::from)?;
            if entry.file_type().is_file()
                && slug_from_path(entry.path(), &self.extensions).is_some()
            {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Load every document of the collection.
    ///
    /// Files that fail to parse or validate, and files whose slug is already
    /// taken by an earlier file, are skipped and listed in
    /// [`LoadReport::failures`].
    pub fn load_all(&self) -> LoadReport<D> {
        let files = match self.source_files() {
            Ok(files) => files,
            Err(err) => {
                log!("error"; "cannot read {} directory {}: {}", D::COLLECTION, self.dir.display(), err);
                return LoadReport::default();
            }
        };

        let results: Vec<(PathBuf, Result<D>)> = files
            .into_par_iter()
            .map(|path| {
                let result = self.load_file(&path);
                (path, result)
            })
            .collect();

        let mut report = LoadReport::default();
        let mut seen: FxHashMap<String, PathBuf> = FxHashMap::default();

        for (path, result) in results {
            let outcome = result.and_then(|doc| match seen.get(doc.slug()) {
                Some(existing) => Err(ContentError::DuplicateSlug {
                    slug: doc.slug().to_owned(),
                    file: path.clone(),
                    existing: existing.clone(),
                }),
                None => {
                    seen.insert(doc.slug().to_owned(), path.clone());
                    Ok(doc)
                }
            });

            match outcome {
                Ok(doc) => report.documents.push(doc),
                Err(err) => {
                    log!("error"; "skipping {}: {}", path.display(), err);
                    report.failures.push(LoadFailure::new(path, &err));
                }
            }
        }

        log!(
            "load";
            "{}: {} documents, {} skipped",
            D::COLLECTION,
            report.documents.len(),
            report.failures.len()
        );
        report
    }

    /// Load the document whose file name is `slug`.
    ///
    /// Files are matched the way [`load_all`](Self::load_all) keys them: by
    /// [`slug_from_path`] over [`source_files`](Self::source_files), with the
    /// first file in path order that loads winning. Returns `None` when no
    /// such file loads (failures are logged). Slugs that could escape the
    /// collection directory are never looked up.
    pub fn load_one(&self, slug: &str) -> Option<D> {
        if !is_url_safe(slug) {
            return None;
        }

        let files = match self.source_files() {
            Ok(files) => files,
            Err(err) => {
                log!("error"; "cannot read {} directory {}: {}", D::COLLECTION, self.dir.display(), err);
                return None;
            }
        };

        files
            .into_iter()
            .filter(|path| slug_from_path(path, &self.extensions).as_deref() == Some(slug))
            .find_map(|path| match self.load_file(&path) {
                Ok(doc) => Some(doc),
                Err(err) => {
                    log!("error"; "cannot load {}: {}", path.display(), err);
                    None
                }
            })
    }

    /// Parse and validate a single file.
    pub fn load_file(&self, path: &Path) -> Result<D> {
        let slug = slug_from_path(path, &self.extensions)
            .ok_or_else(|| ContentError::NotFound(path.to_path_buf()))?;
        let parsed = content::parse_file(path)?;
        let derived = Derived {
            slug,
            excerpt: parsed.excerpt,
            content: parsed.content,
        };
        D::validate(&parsed.front_matter, &derived).map_err(|failure| ContentError::Validation {
            file: path.to_path_buf(),
            failure,
        })
    }
}
