//! Error types for configuration loading and validation.

/// Errors that can occur when loading or validating a `tempo.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A required field is missing from the configuration.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_field() {
        let err = ConfigError::MissingField("design.name".to_string());
        assert_eq!(format!("{err}"), "missing required field: design.name");
    }

    #[test]
    fn display_validation_error() {
        let err = ConfigError::ValidationError("analysis.max_paths must be > 0".to_string());
        assert_eq!(
            format!("{err}"),
            "validation error: analysis.max_paths must be > 0"
        );
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no tempo.toml");
        let err: ConfigError = io_err.into();
        assert!(format!("{err}").starts_with("failed to read configuration:"));
    }
}
