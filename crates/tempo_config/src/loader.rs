//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "tempo.toml";

/// Loads and validates `<project_dir>/tempo.toml`.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    load_config_from_path(&project_dir.join(CONFIG_FILE_NAME))
}

/// Loads and validates a configuration file at an explicit path.
pub fn load_config_from_path(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `tempo.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.design.name.trim().is_empty() {
        return Err(ConfigError::MissingField("design.name".to_string()));
    }
    if let Some(period) = config.analysis.clock_period {
        if !period.is_finite() || period <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "analysis.clock_period must be a positive number, got {period}"
            )));
        }
    }
    if config.analysis.max_paths == 0 {
        return Err(ConfigError::ValidationError(
            "analysis.max_paths must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
