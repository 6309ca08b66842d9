//! Project configuration from `quire.toml`.
//!
//! # Sections
//!
//! | Section            | Purpose                                        |
//! |--------------------|------------------------------------------------|
//! | `[content]`        | Content root and document extensions           |
//! | `[cache]`          | When loaded collections are refreshed          |
//! | `[render]`         | Markdown rendering and code highlighting       |
//! | `[collections.*]`  | Per-collection directory and featured policy   |
//!
//! Every section is optional; a project without `quire.toml` uses the defaults.
//!
//! # Example
//!
//! ```toml
//! [content]
//! root = "content"
//!
//! [cache]
//! mode = "mtime"
//!
//! [collections.members]
//! dir = "people"
//! featured_fallback = "manual-order"
//! ```

mod cache;
mod content;
pub mod defaults;
mod error;
mod render;

pub use cache::{CacheConfig, CacheMode};
pub use content::{
    CollectionConfig, CollectionKind, CollectionsConfig, ContentConfig, FeaturedFallback,
};
pub use error::ConfigError;
pub use render::RenderConfig;

use crate::cli::Cli;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing quire.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute project root (set after loading)
    #[serde(skip)]
    pub root: PathBuf,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub collections: CollectionsConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Default configuration anchored at `root`.
    pub fn with_root(root: &Path) -> Self {
        let mut config = Self::default();
        config.anchor(root, &root.join(defaults::config_file()));
        config
    }

    /// Load `file` (relative to `root`). A missing file yields the defaults.
    pub fn load(root: &Path, file: &Path) -> Result<Self> {
        let path = root.join(file);
        let mut config = if path.is_file() {
            Self::from_path(&path)?
        } else {
            Self::default()
        };
        config.anchor(root, &path);
        Ok(config)
    }

    /// Load the configuration named by the command line and apply its
    /// overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("./"));
        let mut config = Self::load(&root, &cli.config)?;
        config.update_with_cli(cli);
        Ok(config)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        if let Some(content) = &cli.content {
            self.content.root = Self::normalize_path(&self.root.join(Self::expand(content)));
        }
        Self::update_option(&mut self.cache.mode, cli.cache.as_ref());
        Self::update_option(&mut self.render.highlight, cli.highlight.as_ref());
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Record the root and config path, and make every path absolute.
    fn anchor(&mut self, root: &Path, config_path: &Path) {
        self.root = Self::normalize_path(root);
        self.config_path = Self::normalize_path(config_path);
        self.content.root = Self::normalize_path(&self.root.join(Self::expand(&self.content.root)));
    }

    /// Expand a leading `~` in a configured path.
    fn expand(path: &Path) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Check that the configuration can be used to load content.
    pub fn validate(&self) -> Result<()> {
        let root = &self.content.root;
        if !root.exists() {
            bail!(ConfigError::Validation(format!(
                "[content.root] `{}` not found",
                root.display()
            )));
        }
        if !root.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[content.root] `{}` is not a directory",
                root.display()
            )));
        }

        if self.content.extensions.is_empty() {
            bail!(ConfigError::Validation(
                "[content.extensions] must have at least one element".into()
            ));
        }
        if let Some(ext) = self
            .content
            .extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            bail!(ConfigError::Validation(format!(
                "[content.extensions] entry `{ext}` must be a bare extension like \"md\""
            )));
        }

        for kind in CollectionKind::ALL {
            if let Some(dir) = &self.collections.get(kind).dir
                && dir.is_absolute()
            {
                bail!(ConfigError::Validation(format!(
                    "[collections.{kind}.dir] must be relative to [content.root]"
                )));
            }
        }

        Ok(())
    }

    /// Absolute directory of a collection.
    pub fn collection_dir(&self, kind: CollectionKind) -> PathBuf {
        let dir = self
            .collections
            .get(kind)
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(kind.default_dir()));
        self.content.root.join(dir)
    }

    pub fn featured_fallback(&self, kind: CollectionKind) -> FeaturedFallback {
        self.collections
            .get(kind)
            .featured_fallback
            .unwrap_or_else(|| kind.default_fallback())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_unknown_section_rejected() {
        assert!(SiteConfig::from_str("[server]\nport = 1").is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::load(dir.path(), Path::new("quire.toml")).unwrap();
        assert!(config.root.is_absolute());
        assert!(config.content.root.ends_with("content"));
        assert_eq!(config.cache.mode, CacheMode::Mtime);
    }

    #[test]
    fn test_load_reads_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("quire.toml"),
            "[content]\nroot = \"site\"\n[cache]\nmode = \"off\"\n",
        )
        .unwrap();
        fs::create_dir(dir.path().join("site")).unwrap();

        let config = SiteConfig::load(dir.path(), Path::new("quire.toml")).unwrap();
        assert_eq!(config.cache.mode, CacheMode::Off);
        assert_eq!(
            config.content.root,
            dir.path().join("site").canonicalize().unwrap()
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_invalid_file_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("quire.toml"), "[cache]\nmode = 3\n").unwrap();
        assert!(SiteConfig::load(dir.path(), Path::new("quire.toml")).is_err());
    }

    #[test]
    fn test_collection_dir_and_fallback() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::with_root(dir.path());
        config.collections.members.dir = Some("people".into());

        assert!(config.collection_dir(CollectionKind::Members).ends_with("content/people"));
        assert!(config.collection_dir(CollectionKind::Blog).ends_with("content/blog"));
        assert_eq!(
            config.featured_fallback(CollectionKind::Members),
            FeaturedFallback::ManualOrder
        );
        assert_eq!(
            config.featured_fallback(CollectionKind::Events),
            FeaturedFallback::None
        );
    }

    #[test]
    fn test_validate_missing_root() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::with_root(dir.path());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_validate_extensions() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("content")).unwrap();
        let mut config = SiteConfig::with_root(dir.path());
        assert!(config.validate().is_ok());

        config.content.extensions = vec![".md".into()];
        assert!(config.validate().is_err());
        config.content.extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = Cli::parse_from([
            "quire", "--root", root, "--content", "docs", "--cache", "manual", "--highlight",
            "false", "tags", "blog",
        ]);

        let config = SiteConfig::from_cli(&cli).unwrap();
        assert_eq!(config.cache.mode, CacheMode::Manual);
        assert!(!config.render.highlight);
        assert_eq!(
            config.content.root,
            dir.path().join("docs").canonicalize().unwrap()
        );
    }
}
