//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [content] Section Defaults
// ============================================================================

pub mod content {
    use std::path::PathBuf;

    pub fn root() -> PathBuf {
        "content".into()
    }

    pub fn extensions() -> Vec<String> {
        vec!["md".into()]
    }
}

// ============================================================================
// [render] Section Defaults
// ============================================================================

pub mod render {
    pub fn class_prefix() -> String {
        crate::content::DEFAULT_CLASS_PREFIX.into()
    }
}

/// Name of the config file looked up in the project root.
pub fn config_file() -> &'static str {
    "quire.toml"
}
