//! Collection loading and caching.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                          CollectionCache<D>                          │
//! │                                                                      │
//! │  ┌──────────────────┐   LoadReport    ┌────────────────────────────┐ │
//! │  │ CollectionLoader │ ──────────────► │ Snapshot (ArcSwapOption)   │ │
//! │  │  walk dir        │                 │  documents: Vec<Arc<D>>    │ │
//! │  │  parse (rayon)   │                 │  index: slug -> position   │ │
//! │  │  validate        │                 │  failures                  │ │
//! │  └──────────────────┘                 └────────────────────────────┘ │
//! │           ▲                                        │                 │
//! │           └──── fingerprint changed / reload() ────┘                 │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Query code never touches the loader directly: it works on the documents of
//! a snapshot through the [`Document`] trait.

mod cache;
mod loader;
mod types;

pub use cache::{CollectionCache, Fingerprint, Snapshot};
pub use loader::{CollectionLoader, LoadFailure, LoadReport};
pub use types::{Document, FieldValue};
pub(crate) use types::base_field;
