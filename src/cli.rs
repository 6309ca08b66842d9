//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::config::{CacheMode, CollectionKind};
use crate::query::SortOrder;
use crate::utils::date::Timestamp;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Query the content collections of a research-network site
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name, relative to the project root
    #[arg(short = 'C', long, default_value = "quire.toml")]
    pub config: PathBuf,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Override `[cache.mode]`
    #[arg(long, value_enum)]
    pub cache: Option<CacheMode>,

    /// Syntax-highlight code blocks when rendering
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub highlight: Option<bool>,

    /// Suppress log output on stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Filter criteria shared by `list`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Keep documents with any of these tags (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Keep only featured (true) or non-featured (false) documents
    #[arg(long)]
    pub featured: Option<bool>,

    /// Earliest date, inclusive (e.g. 2024-01-01)
    #[arg(long)]
    pub from: Option<Timestamp>,

    /// Latest date, inclusive
    #[arg(long)]
    pub to: Option<Timestamp>,

    /// Case-insensitive author substring
    #[arg(long)]
    pub author: Option<String>,

    /// Exact publication type (journal, conference, workshop, thesis)
    #[arg(long = "type")]
    pub kind: Option<String>,
}

/// Pagination arguments; a page is returned only when `--page` is given
#[derive(clap::Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// 1-indexed page number
    #[arg(long)]
    pub page: Option<usize>,

    /// Items per page (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Load every collection and report documents that fail to load
    Check,

    /// List documents as JSON
    List {
        collection: CollectionKind,

        #[command(flatten)]
        filter: FilterArgs,

        /// Field to sort by (e.g. date, title, order)
        #[arg(long)]
        sort: Option<String>,

        /// Sort direction
        #[arg(long, value_enum, default_value_t = SortOrder::Desc)]
        order: SortOrder,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Case-insensitive substring search, as JSON
    Search {
        collection: CollectionKind,

        query: String,

        /// Field to search (repeatable; default: title, content, excerpt)
        #[arg(long = "field")]
        fields: Vec<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Documents sharing tags with a document, as JSON
    Related {
        collection: CollectionKind,

        slug: String,

        #[arg(long, default_value_t = crate::query::DEFAULT_RELATED_LIMIT)]
        limit: usize,
    },

    /// All tags of a collection, sorted, as JSON
    Tags { collection: CollectionKind },

    /// Render a document's markdown body to HTML
    Render { collection: CollectionKind, slug: String },
}

impl Commands {
    /// The collection a command runs against; `None` for `check`, which
    /// covers every collection.
    pub fn collection(&self) -> Option<CollectionKind> {
        match self {
            Self::Check => None,
            Self::List { collection, .. }
            | Self::Search { collection, .. }
            | Self::Related { collection, .. }
            | Self::Tags { collection }
            | Self::Render { collection, .. } => Some(*collection),
        }
    }
}
