//! `[render]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[render]` section in quire.toml - markdown to HTML settings.
///
/// # Example
/// ```toml
/// [render]
/// highlight = true
/// class_prefix = "hljs-"   # "" for bare scope classes
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Syntax-highlight fenced code blocks.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub highlight: bool,

    /// CSS class prefix of highlight spans.
    #[serde(default = "defaults::render::class_prefix")]
    #[educe(Default = defaults::render::class_prefix())]
    pub class_prefix: String,
}
