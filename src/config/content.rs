//! `[content]` and `[collections.*]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf};

/// `[content]` section in quire.toml.
///
/// # Example
/// ```toml
/// [content]
/// root = "content"
/// extensions = ["md", "markdown"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Content tree root, relative to the project root.
    #[serde(default = "defaults::content::root")]
    #[educe(Default = defaults::content::root())]
    pub root: PathBuf,

    /// File extensions treated as documents (without the dot).
    #[serde(default = "defaults::content::extensions")]
    #[educe(Default = defaults::content::extensions())]
    pub extensions: Vec<String>,
}

/// What `featured` returns when no document is flagged featured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeaturedFallback {
    /// Nothing.
    #[default]
    None,
    /// Every document, by ascending manual `order`.
    ManualOrder,
}

/// The four content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Events,
    Blog,
    Members,
    Publications,
}

impl CollectionKind {
    pub const ALL: [Self; 4] = [Self::Events, Self::Blog, Self::Members, Self::Publications];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Blog => "blog",
            Self::Members => "members",
            Self::Publications => "publications",
        }
    }

    /// Directory under the content root when none is configured.
    pub const fn default_dir(self) -> &'static str {
        self.as_str()
    }

    pub const fn default_fallback(self) -> FeaturedFallback {
        match self {
            Self::Members => FeaturedFallback::ManualOrder,
            _ => FeaturedFallback::None,
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `[collections.<name>]` section.
///
/// # Example
/// ```toml
/// [collections.members]
/// dir = "people"
/// featured_fallback = "none"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionConfig {
    /// Directory relative to `[content.root]`; defaults to the collection name.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default)]
    pub featured_fallback: Option<FeaturedFallback>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionsConfig {
    #[serde(default)]
    pub events: CollectionConfig,
    #[serde(default)]
    pub blog: CollectionConfig,
    #[serde(default)]
    pub members: CollectionConfig,
    #[serde(default)]
    pub publications: CollectionConfig,
}

impl CollectionsConfig {
    pub fn get(&self, kind: CollectionKind) -> &CollectionConfig {
        match kind {
            CollectionKind::Events => &self.events,
            CollectionKind::Blog => &self.blog,
            CollectionKind::Members => &self.members,
            CollectionKind::Publications => &self.publications,
        }
    }
}
