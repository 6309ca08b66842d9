//! Content-type registries.
//!
//! A [`ContentRegistry`] binds one collection directory to one schema and
//! answers queries over its cached snapshot. [`ContentStore`] holds the four
//! registries of a site.
//!
//! Documents are handed out as `Arc<D>`: every call shares the snapshot's
//! records instead of cloning them.

use crate::config::{CacheMode, CollectionKind, FeaturedFallback, SiteConfig};
use crate::content::MarkdownRenderer;
use crate::data::{CollectionCache, CollectionLoader, Document, LoadFailure, Snapshot};
use crate::error::Result;
use crate::query::{
    self, Filter, PageRequest, Paginated, QueryResult, SearchOptions, Sort,
};
use crate::schema::{BlogPost, Event, Member, Publication, Schema};
use serde::Serialize;
use std::{collections::BTreeSet, sync::Arc};

/// Default number of items returned by [`ContentRegistry::recent`].
pub const DEFAULT_RECENT_LIMIT: usize = 10;

pub struct ContentRegistry<D> {
    cache: CollectionCache<D>,
    renderer: MarkdownRenderer,
    fallback: FeaturedFallback,
}

impl<D: Schema> ContentRegistry<D> {
    pub fn new(loader: CollectionLoader<D>, mode: CacheMode) -> Self {
        Self {
            cache: CollectionCache::new(loader, mode),
            renderer: MarkdownRenderer::default(),
            fallback: FeaturedFallback::None,
        }
    }

    pub fn from_config(config: &SiteConfig, kind: CollectionKind) -> Self {
        let loader = CollectionLoader::new(config.collection_dir(kind), config.content.extensions.clone());
        Self::new(loader, config.cache.mode)
            .with_renderer(MarkdownRenderer::from_config(&config.render))
            .with_featured_fallback(config.featured_fallback(kind))
    }

    pub fn with_renderer(mut self, renderer: MarkdownRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_featured_fallback(mut self, fallback: FeaturedFallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn featured_fallback(&self) -> FeaturedFallback {
        self.fallback
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    /// The current snapshot, (re)loaded according to the cache mode.
    pub fn snapshot(&self) -> Arc<Snapshot<D>> {
        self.cache.snapshot()
    }

    /// Reload the collection from disk.
    pub fn reload(&self) -> Arc<Snapshot<D>> {
        self.cache.reload()
    }

    /// Files skipped by the most recent load (loading first if needed).
    pub fn failures(&self) -> Vec<LoadFailure> {
        let snapshot = match self.cache.peek() {
            Some(snapshot) => snapshot,
            None => self.snapshot(),
        };
        snapshot.failures().to_vec()
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Every valid document, in file-name order.
    pub fn all(&self) -> Vec<Arc<D>> {
        self.snapshot().documents().to_vec()
    }

    /// The document with this slug.
    ///
    /// With caching off only that one file is read.
    pub fn by_slug(&self, slug: &str) -> Option<Arc<D>> {
        match self.cache.mode() {
            CacheMode::Off => self.cache.loader().load_one(slug).map(Arc::new),
            _ => self.snapshot().get(slug).cloned(),
        }
    }

    /// Featured documents, newest first.
    ///
    /// When none is flagged, [`FeaturedFallback::ManualOrder`] returns every
    /// document by ascending `order` instead.
    pub fn featured(&self, limit: Option<usize>) -> Vec<Arc<D>> {
        let all = self.all();
        let flagged = query::filter(&all, &Filter::new().featured(true));

        let mut result = if !flagged.is_empty() {
            query::sort(&flagged, &Sort::newest())
        } else {
            match self.fallback {
                FeaturedFallback::None => Vec::new(),
                FeaturedFallback::ManualOrder => {
                    let mut ordered = all;
                    ordered.sort_by(|a, b| {
                        a.order()
                            .unwrap_or_default()
                            .total_cmp(&b.order().unwrap_or_default())
                    });
                    ordered
                }
            }
        };

        if let Some(limit) = limit {
            result.truncate(limit);
        }
        result
    }

    pub fn by_tag(&self, tag: &str) -> Vec<Arc<D>> {
        query::filter(&self.all(), &Filter::new().tag(tag))
    }

    /// The `limit` newest documents.
    pub fn recent(&self, limit: usize) -> Vec<Arc<D>> {
        let mut sorted = query::sort(&self.all(), &Sort::newest());
        sorted.truncate(limit);
        sorted
    }

    /// Every tag used in the collection, deduplicated and sorted.
    pub fn all_tags(&self) -> Vec<String> {
        let snapshot = self.snapshot();
        let tags: BTreeSet<&str> = snapshot
            .documents()
            .iter()
            .flat_map(|doc| doc.tags().iter().map(String::as_str))
            .collect();
        tags.into_iter().map(str::to_owned).collect()
    }

    /// Render a document's body to HTML.
    ///
    /// `Ok(None)` when the slug is unknown or the body is empty; render
    /// failures are returned as errors.
    pub fn render_content_to_html(&self, slug: &str) -> Result<Option<String>> {
        let Some(doc) = self.by_slug(slug) else {
            return Ok(None);
        };
        if doc.content().trim().is_empty() {
            return Ok(None);
        }
        self.renderer.render(doc.content()).map(Some)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Filtered and optionally sorted documents.
    pub fn list(&self, filter: &Filter, sort: Option<&Sort>) -> Vec<Arc<D>> {
        let filtered = query::filter(&self.all(), filter);
        match sort {
            Some(sort) => query::sort(&filtered, sort),
            None => filtered,
        }
    }

    /// One page of [`list`](Self::list).
    pub fn paginate(&self, filter: &Filter, sort: Option<&Sort>, page: PageRequest) -> Paginated<Arc<D>> {
        query::paginate(&self.list(filter, sort), page)
    }

    /// Documents containing `query` in any of `fields` (default: title,
    /// content, excerpt).
    pub fn search<S: AsRef<str>>(&self, query: &str, fields: &[S]) -> Vec<Arc<D>> {
        query::search(&self.all(), query, fields)
    }

    /// One page of [`search`](Self::search).
    pub fn search_page<S: AsRef<str>>(&self, query: &str, fields: &[S], page: PageRequest) -> Paginated<Arc<D>> {
        query::paginate(&self.search(query, fields), page)
    }

    /// Search, filter, sort and optionally paginate in one call.
    pub fn query(&self, options: &SearchOptions) -> QueryResult<Arc<D>> {
        options.run(&self.all())
    }

    /// Documents sharing tags with `slug`, most shared first.
    pub fn related(&self, slug: &str, limit: usize) -> Vec<Arc<D>> {
        query::related(&self.all(), slug, limit)
    }
}

// ============================================================================
// Content Store
// ============================================================================

/// Load status of one collection.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionSummary {
    pub collection: CollectionKind,
    pub documents: usize,
    pub failures: Vec<LoadFailure>,
}

/// The four registries of a site.
pub struct ContentStore {
    pub events: ContentRegistry<Event>,
    pub blog: ContentRegistry<BlogPost>,
    pub members: ContentRegistry<Member>,
    pub publications: ContentRegistry<Publication>,
}

impl ContentStore {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            events: ContentRegistry::from_config(config, CollectionKind::Events),
            blog: ContentRegistry::from_config(config, CollectionKind::Blog),
            members: ContentRegistry::from_config(config, CollectionKind::Members),
            publications: ContentRegistry::from_config(config, CollectionKind::Publications),
        }
    }

    /// Reload every collection from disk.
    pub fn reload_all(&self) {
        self.events.reload();
        self.blog.reload();
        self.members.reload();
        self.publications.reload();
    }

    /// Document and failure counts of every collection.
    pub fn summary(&self) -> Vec<CollectionSummary> {
        fn summarize<D: Schema>(collection: CollectionKind, registry: &ContentRegistry<D>) -> CollectionSummary {
            let snapshot = registry.snapshot();
            CollectionSummary {
                collection,
                documents: snapshot.len(),
                failures: snapshot.failures().to_vec(),
            }
        }

        vec![
            summarize(CollectionKind::Events, &self.events),
            summarize(CollectionKind::Blog, &self.blog),
            summarize(CollectionKind::Members, &self.members),
            summarize(CollectionKind::Publications, &self.publications),
        ]
    }
}
