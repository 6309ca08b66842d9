//! In-memory collection cache.
//!
//! Readers get an immutable [`Snapshot`] through an `ArcSwapOption`, so lookups
//! never block. Rebuilds are serialized by a mutex and publish a fresh snapshot
//! atomically; readers holding the old one keep using it.
//!
//! ```text
//!  snapshot() ──► mode? ──► off ──────────────────────────► rebuild
//!                   │
//!                   ├─► manual ─► cached? ── yes ─► return
//!                   │                └─ no ───────────────► rebuild
//!                   │
//!                   └─► mtime ──► fingerprint == cached? ── yes ─► return
//!                                      └─ no ─────────────────► rebuild
//! ```

use super::loader::{CollectionLoader, LoadFailure, LoadReport};
use super::Document;
use crate::config::CacheMode;
use crate::log;
use crate::schema::Schema;
use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::{fs, sync::Arc, time::UNIX_EPOCH};

/// Hash of a collection directory's file list, sizes and modification times.
pub type Fingerprint = blake3::Hash;

/// An immutable, fully loaded collection.
#[derive(Debug)]
pub struct Snapshot<D> {
    documents: Vec<Arc<D>>,
    index: FxHashMap<String, usize>,
    failures: Vec<LoadFailure>,
    fingerprint: Option<Fingerprint>,
}

impl<D: Document> Snapshot<D> {
    fn new(report: LoadReport<D>, fingerprint: Option<Fingerprint>) -> Self {
        let documents: Vec<Arc<D>> = report.documents.into_iter().map(Arc::new).collect();
        let index = documents
            .iter()
            .enumerate()
            .map(|(i, doc)| (doc.slug().to_owned(), i))
            .collect();
        Self {
            documents,
            index,
            failures: report.failures,
            fingerprint,
        }
    }

    /// Documents in file-name order.
    pub fn documents(&self) -> &[Arc<D>] {
        &self.documents
    }

    pub fn get(&self, slug: &str) -> Option<&Arc<D>> {
        self.index.get(slug).map(|&i| &self.documents[i])
    }

    /// Files skipped by the load that produced this snapshot.
    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Caches one collection according to a [`CacheMode`].
pub struct CollectionCache<D> {
    loader: CollectionLoader<D>,
    mode: CacheMode,
    current: ArcSwapOption<Snapshot<D>>,
    rebuild: Mutex<()>,
}

impl<D: Schema> CollectionCache<D> {
    pub fn new(loader: CollectionLoader<D>, mode: CacheMode) -> Self {
        Self {
            loader,
            mode,
            current: ArcSwapOption::empty(),
            rebuild: Mutex::new(()),
        }
    }

    pub fn loader(&self) -> &CollectionLoader<D> {
        &self.loader
    }

    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    /// The current collection, loading or refreshing it first when needed.
    pub fn snapshot(&self) -> Arc<Snapshot<D>> {
        match self.mode {
            CacheMode::Off => self.rebuild(None),
            CacheMode::Manual => match self.current.load_full() {
                Some(snapshot) => snapshot,
                None => {
                    let _guard = self.rebuild.lock();
                    // Another thread may have loaded while we waited
                    match self.current.load_full() {
                        Some(snapshot) => snapshot,
                        None => self.rebuild(None),
                    }
                }
            },
            CacheMode::Mtime => {
                let fingerprint = self.fingerprint();
                if let Some(snapshot) = self.fresh(fingerprint) {
                    return snapshot;
                }
                let _guard = self.rebuild.lock();
                match self.fresh(fingerprint) {
                    Some(snapshot) => snapshot,
                    None => self.rebuild(Some(fingerprint)),
                }
            }
        }
    }

    /// Drop the cached snapshot and load the collection again.
    pub fn reload(&self) -> Arc<Snapshot<D>> {
        let _guard = self.rebuild.lock();
        let fingerprint = (self.mode == CacheMode::Mtime).then(|| self.fingerprint());
        self.rebuild(fingerprint)
    }

    /// Forget the cached snapshot; the next read loads from disk.
    pub fn invalidate(&self) {
        self.current.store(None);
    }

    /// The last published snapshot, without triggering a load.
    pub fn peek(&self) -> Option<Arc<Snapshot<D>>> {
        self.current.load_full()
    }

    fn fresh(&self, fingerprint: Fingerprint) -> Option<Arc<Snapshot<D>>> {
        self.current
            .load_full()
            .filter(|snapshot| snapshot.fingerprint == Some(fingerprint))
    }

    fn rebuild(&self, fingerprint: Option<Fingerprint>) -> Arc<Snapshot<D>> {
        if self.mode != CacheMode::Off {
            log!("cache"; "loading {} from {}", D::COLLECTION, self.loader.dir().display());
        }
        let snapshot = Arc::new(Snapshot::new(self.loader.load_all(), fingerprint));
        self.current.store(Some(Arc::clone(&snapshot)));
        snapshot
    }

    /// Fingerprint of the collection's source files.
    ///
    /// An unreadable directory hashes to a fixed value, so it compares equal
    /// to itself until it becomes readable again.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = blake3::Hasher::new();
        let files = match self.loader.source_files() {
            Ok(files) => files,
            Err(_) => return hasher.update(b"unreadable").finalize(),
        };

        for path in files {
            hasher.update(path.to_string_lossy().as_bytes());
            hasher.update(&[0]);
            if let Ok(meta) = fs::metadata(&path) {
                hasher.update(&meta.len().to_le_bytes());
                let mtime = meta
                    .modified()
                    .ok()
                    .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                    .map_or(0, |d| d.as_nanos());
                hasher.update(&mtime.to_le_bytes());
            }
        }
        hasher.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger;
    use crate::schema::BlogPost;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_post(dir: &Path, slug: &str, title: &str) {
        let source = format!(
            "---\ntitle: {title}\ndate: 2024-01-01\nauthor: Jane\nexcerpt: x\n---\nbody\n"
        );
        fs::write(dir.join(format!("{slug}.md")), source).unwrap();
    }

    fn cache(dir: &Path, mode: CacheMode) -> CollectionCache<BlogPost> {
        CollectionCache::new(CollectionLoader::new(dir, vec!["md".to_string()]), mode)
    }

    #[test]
    fn test_manual_mode_reuses_snapshot_until_reload() {
        logger::set_quiet(true);
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "a", "A");
        let cache = cache(dir.path(), CacheMode::Manual);

        let first = cache.snapshot();
        write_post(dir.path(), "b", "B");
        let second = cache.snapshot();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);

        let reloaded = cache.reload();
        assert_eq!(reloaded.len(), 2);
        assert!(Arc::ptr_eq(&reloaded, &cache.snapshot()));
    }

    #[test]
    fn test_mtime_mode_picks_up_new_files() {
        logger::set_quiet(true);
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "a", "A");
        let cache = cache(dir.path(), CacheMode::Mtime);

        let first = cache.snapshot();
        assert!(Arc::ptr_eq(&first, &cache.snapshot()));

        write_post(dir.path(), "b", "B");
        let second = cache.snapshot();
        assert_eq!(second.len(), 2);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_mtime_mode_picks_up_removed_files() {
        logger::set_quiet(true);
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "a", "A");
        write_post(dir.path(), "b", "B");
        let cache = cache(dir.path(), CacheMode::Mtime);
        assert_eq!(cache.snapshot().len(), 2);

        fs::remove_file(dir.path().join("b.md")).unwrap();
        assert_eq!(cache.snapshot().len(), 1);
    }

    #[test]
    fn test_off_mode_always_rereads() {
        logger::set_quiet(true);
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "a", "A");
        let cache = cache(dir.path(), CacheMode::Off);

        let first = cache.snapshot();
        let second = cache.snapshot();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn test_snapshot_index() {
        logger::set_quiet(true);
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "hello", "Hello");
        fs::write(dir.path().join("broken.md"), "---\ntitle: B\n---\n").unwrap();
        let cache = cache(dir.path(), CacheMode::Manual);

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.get("hello").map(|p| p.title()), Some("Hello"));
        assert!(snapshot.get("broken").is_none());
        assert_eq!(snapshot.failures().len(), 1);
    }

    #[test]
    fn test_invalidate_and_peek() {
        logger::set_quiet(true);
        let dir = TempDir::new().unwrap();
        let cache = cache(dir.path(), CacheMode::Manual);
        assert!(cache.peek().is_none());
        cache.snapshot();
        assert!(cache.peek().is_some());
        cache.invalidate();
        assert!(cache.peek().is_none());
    }

    #[test]
    fn test_fingerprint_tracks_content_size() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "a", "A");
        let cache = cache(dir.path(), CacheMode::Mtime);
        let before = cache.fingerprint();
        assert_eq!(before, cache.fingerprint());
        write_post(dir.path(), "a", "A much longer title");
        assert_ne!(before, cache.fingerprint());
    }
}
