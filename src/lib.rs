//! Quire - a file-backed content store for research-network websites.
//!
//! Markdown documents with YAML front matter are loaded per content type
//! (events, blog posts, members, publications), validated into typed records,
//! cached in memory and queried with filters, sorting, pagination, full-text
//! search and related-content suggestions.
//!
//! ```ignore
//! use quire::{ContentStore, SiteConfig, query::{Filter, PageRequest, Sort}};
//!
//! let config = SiteConfig::load(Path::new("."), Path::new("quire.toml"))?;
//! let store = ContentStore::new(&config);
//! let page = store.events.paginate(&Filter::new().tag("iot"), Some(&Sort::newest()), PageRequest::first(10));
//! ```

pub mod cli;
pub mod config;
pub mod content;
pub mod data;
pub mod error;
pub mod logger;
pub mod preview;
pub mod query;
pub mod registry;
pub mod schema;
pub mod utils;

pub use config::SiteConfig;
pub use error::{ContentError, ContentErrorKind, Result};
pub use registry::{ContentRegistry, ContentStore};
