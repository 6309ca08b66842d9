//! End-to-end behavior of a content store built over a temporary site.

use quire::config::{CacheMode, CollectionKind};
use quire::content::{ELLIPSIS, EXCERPT_LENGTH, derive_excerpt};
use quire::data::Document;
use quire::query::{Filter, PageRequest, Sort};
use quire::{ContentErrorKind, ContentStore, SiteConfig, logger};
use std::fs;
use tempfile::TempDir;

struct Site {
    dir: TempDir,
}

impl Site {
    fn new() -> Self {
        logger::set_quiet(true);
        let dir = TempDir::new().unwrap();
        for kind in CollectionKind::ALL {
            fs::create_dir_all(dir.path().join("content").join(kind.as_str())).unwrap();
        }
        Self { dir }
    }

    fn write(&self, collection: &str, slug: &str, source: &str) {
        let path = self.dir.path().join("content").join(collection).join(format!("{slug}.md"));
        fs::write(path, source).unwrap();
    }

    fn post(&self, slug: &str, date: &str, tags: &str) {
        self.write(
            "blog",
            slug,
            &format!(
                "---\ntitle: Post {slug}\ndate: {date}\nauthor: Jane Doe\nexcerpt: Excerpt of {slug}\ntags: {tags}\n---\nBody of {slug}.\n"
            ),
        );
    }

    fn event(&self, slug: &str, date: &str) {
        self.write(
            "events",
            slug,
            &format!(
                "---\ntitle: Event {slug}\ndate: {date}\nlocation: Yaoundé\ndescription: About {slug}\n---\nProgramme.\n"
            ),
        );
    }

    fn config(&self) -> SiteConfig {
        SiteConfig::with_root(self.dir.path())
    }

    fn store(&self) -> ContentStore {
        ContentStore::new(&self.config())
    }
}

fn slugs<D: Document>(items: &[D]) -> Vec<String> {
    items.iter().map(|d| d.slug().to_owned()).collect()
}

#[test]
fn test_all_tags_scenario() {
    let site = Site::new();
    site.post("one", "2024-01-01", "[cloud]");
    site.post("two", "2024-01-02", "[cloud, iot]");
    site.post("three", "2024-01-03", "[iot]");

    assert_eq!(site.store().blog.all_tags(), ["cloud", "iot"]);
}

#[test]
fn test_paginated_events_scenario() {
    let site = Site::new();
    for day in 1..=5 {
        site.event(&format!("event-{day}"), &format!("2024-03-0{day}"));
    }

    let store = site.store();
    let page = store
        .events
        .paginate(&Filter::new(), Some(&Sort::newest()), PageRequest::new(1, 2));
    assert_eq!(slugs(&page.items), ["event-5", "event-4"]);
    assert_eq!(page.pagination.total_pages, 3);
    assert!(page.pagination.has_next_page);
    assert!(!page.pagination.has_previous_page);
}

#[test]
fn test_related_content_scenario() {
    let site = Site::new();
    site.post("post-a", "2024-01-01", "[x, y]");
    site.post("post-b", "2024-01-02", "[x]");
    site.post("post-c", "2024-01-03", "[y, x]");
    site.post("post-d", "2024-01-04", "[z]");

    let related = site.store().blog.related("post-a", 3);
    assert_eq!(slugs(&related), ["post-c", "post-b"]);
}

#[test]
fn test_publication_with_unknown_type_is_excluded() {
    let site = Site::new();
    let publication = |kind: &str| {
        format!(
            "---\ntitle: Paper\ndate: 2023-06-01\nauthors: [A. Author]\njournal: J\nabstract: A\ntype: {kind}\n---\n"
        )
    };
    site.write("publications", "good", &publication("workshop"));
    site.write("publications", "bad", &publication("magazine"));

    let store = site.store();
    assert_eq!(slugs(&store.publications.all()), ["good"]);

    let failures = store.publications.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].kind, ContentErrorKind::Validation);
    assert!(failures[0].message.contains("type:"));
}

#[test]
fn test_search_scenario() {
    let site = Site::new();
    site.write(
        "blog",
        "in-title",
        "---\ntitle: Edge Computing 101\ndate: 2024-01-01\nauthor: A\nexcerpt: Basics\n---\nIntro.\n",
    );
    site.write(
        "blog",
        "in-excerpt",
        "---\ntitle: Field notes\ndate: 2024-01-02\nauthor: A\nexcerpt: Why EDGE computing matters\n---\nNotes.\n",
    );
    site.write(
        "blog",
        "in-body",
        "---\ntitle: Sensors\ndate: 2024-01-03\nauthor: A\nexcerpt: Hardware\n---\nWe discuss edge computing here.\n",
    );

    let hits = site.store().blog.search("edge computing", &["title", "excerpt"]);
    assert_eq!(slugs(&hits), ["in-excerpt", "in-title"]);
}

#[test]
fn test_event_without_location_does_not_break_load() {
    let site = Site::new();
    site.event("good", "2024-01-01");
    site.write(
        "events",
        "no-location",
        "---\ntitle: Broken\ndate: 2024-01-02\ndescription: D\n---\n",
    );
    site.write("events", "not-yaml", "---\ntitle: [oops\n---\n");

    let store = site.store();
    assert_eq!(slugs(&store.events.all()), ["good"]);
    assert_eq!(store.events.failures().len(), 2);
}

#[test]
fn test_get_all_is_idempotent() {
    let site = Site::new();
    site.post("a", "2024-01-01", "[x]");
    site.post("b", "2024-01-02", "[y]");

    for mode in [CacheMode::Mtime, CacheMode::Manual, CacheMode::Off] {
        let mut config = site.config();
        config.cache.mode = mode;
        let store = ContentStore::new(&config);
        let first: Vec<_> = store.blog.all().iter().map(|p| (**p).clone()).collect();
        let second: Vec<_> = store.blog.all().iter().map(|p| (**p).clone()).collect();
        assert_eq!(first, second, "mode {mode:?}");
    }
}

#[test]
fn test_pages_concatenate_to_listing() {
    let site = Site::new();
    for i in 0..7 {
        site.post(&format!("p{i}"), &format!("2024-02-0{}", i + 1), "[news]");
    }

    let store = site.store();
    let filter = Filter::new().tag("news");
    let sort = Sort::newest();
    let listing = store.blog.list(&filter, Some(&sort));

    let first = store.blog.paginate(&filter, Some(&sort), PageRequest::new(1, 3));
    assert_eq!(first.pagination.total_pages, 3);
    let joined: Vec<_> = (1..=first.pagination.total_pages)
        .flat_map(|page| {
            store
                .blog
                .paginate(&filter, Some(&sort), PageRequest::new(page, 3))
                .items
        })
        .collect();
    assert_eq!(slugs(&joined), slugs(&listing));
}

#[test]
fn test_mtime_cache_sees_new_documents() {
    let site = Site::new();
    site.post("a", "2024-01-01", "[]");
    let store = site.store();
    assert_eq!(store.blog.all().len(), 1);

    site.post("b", "2024-01-02", "[]");
    assert_eq!(store.blog.all().len(), 2);
}

#[test]
fn test_derived_excerpt_bound() {
    let site = Site::new();
    let body = "Sensor **networks** and `edge` nodes. ".repeat(30);
    site.write(
        "events",
        "long",
        &format!("---\ntitle: Long\ndate: 2024-01-01\nlocation: L\ndescription: D\n---\n{body}"),
    );

    let event = site.store().events.by_slug("long").unwrap();
    let visible = event.excerpt().strip_suffix(ELLIPSIS).unwrap();
    assert!(visible.chars().count() <= EXCERPT_LENGTH);
    assert!(!visible.contains("**"));
    assert_eq!(event.excerpt(), derive_excerpt(&body));
}

#[test]
fn test_render_content_to_html() {
    let site = Site::new();
    site.write(
        "members",
        "jane",
        "---\nname: Jane\ntitle: Professor\naffiliation: Uni\nbio: Bio\nphoto: /jane.jpg\n---\n| a | b |\n|---|---|\n| 1 | 2 |\n\n```python\nprint('hi')\n```\n",
    );

    let store = site.store();
    let html = store.members.render_content_to_html("jane").unwrap().unwrap();
    assert!(html.contains("<table>"));
    assert!(html.contains("language-python"));
    assert!(store.members.render_content_to_html("nobody").unwrap().is_none());
}

#[test]
fn test_by_slug_agrees_with_listing_in_every_cache_mode() {
    let site = Site::new();
    let blog = site.dir.path().join("content/blog");
    let post = |title: &str| {
        format!("---\ntitle: {title}\ndate: 2024-01-01\nauthor: A\nexcerpt: E\n---\nBody of {title}\n")
    };
    fs::write(blog.join("hello.MD"), post("Upper")).unwrap();
    fs::write(blog.join("a.markdown"), post("Second")).unwrap();
    fs::write(blog.join("a.md"), post("First")).unwrap();

    for mode in [CacheMode::Mtime, CacheMode::Manual, CacheMode::Off] {
        let mut config = site.config();
        config.cache.mode = mode;
        config.content.extensions = vec!["md".to_string(), "markdown".to_string()];
        let store = ContentStore::new(&config);

        for listed in store.blog.all() {
            let found = store.blog.by_slug(listed.slug()).unwrap();
            assert_eq!(found.title(), listed.title(), "mode {mode:?}");
        }
        assert_eq!(store.blog.by_slug("a").unwrap().title(), "Second", "mode {mode:?}");
        let html = store.blog.render_content_to_html("hello").unwrap().unwrap();
        assert!(html.contains("Body of Upper"), "mode {mode:?}");
    }
}
