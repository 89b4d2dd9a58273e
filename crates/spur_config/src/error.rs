//! Error types for configuration loading and validation.

/// Errors that can occur when loading or validating a `spur.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_parse_error() {
        let err = ConfigError::Parse("expected '=' at line 3".to_string());
        assert_eq!(
            err.to_string(),
            "failed to parse configuration: expected '=' at line 3"
        );
    }

    #[test]
    fn display_validation_error() {
        let err = ConfigError::Validation("suffix is empty".to_string());
        assert_eq!(err.to_string(), "validation error: suffix is empty");
    }
}
