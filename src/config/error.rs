//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid quire.toml")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("site/quire.toml"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(io_err.to_string(), "cannot read config file `site/quire.toml`");

        let toml_err = toml::from_str::<toml::Table>("= 1").unwrap_err();
        assert_eq!(ConfigError::from(toml_err).to_string(), "invalid quire.toml");

        let validation_err = ConfigError::Validation("[content.extensions] is empty".into());
        assert!(validation_err.to_string().ends_with("[content.extensions] is empty"));
    }
}
