//! `[cache]` section configuration.

use educe::Educe;
use serde::{Deserialize, Serialize};

/// When a loaded collection is refreshed from disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
    /// Reuse the snapshot until a source file is added, removed or modified.
    #[default]
    Mtime,
    /// Load once; refresh only on explicit reload.
    Manual,
    /// Re-read the sources on every access.
    Off,
}

/// `[cache]` section in quire.toml.
///
/// # Example
/// ```toml
/// [cache]
/// mode = "manual"   # "mtime" | "manual" | "off"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    #[serde(default)]
    pub mode: CacheMode,
}
