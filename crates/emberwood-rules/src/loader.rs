use std::path::Path;

use emberwood_core::config::GameConfig;
use thiserror::Error;

use crate::validator::{validate_config, ValidationError};

/// Built-in tuning shipped with the crate.
pub const DEFAULT_CONFIG_RON: &str = include_str!("../../../data/config/campsite.ron");

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse config RON: {0}")]
    ConfigParseError(String),
    #[error("Failed to read config file '{path}': {message}")]
    Io { path: String, message: String },
    #[error("Config failed validation: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse a campsite config from a RON string. Missing fields take their
/// defaults.
pub fn load_config_from_str(ron_str: &str) -> Result<GameConfig, LoadError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| LoadError::ConfigParseError(e.to_string()))
}

/// Read and parse a RON config file.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<GameConfig, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let config = load_config_from_str(&text)?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}

/// Parse, then reject configs the simulation cannot run with.
pub fn load_validated_config(ron_str: &str) -> Result<GameConfig, LoadError> {
    let config = load_config_from_str(ron_str)?;
    validate_config(&config).map_err(LoadError::Invalid)?;
    Ok(config)
}

/// The built-in config.
pub fn default_config() -> Result<GameConfig, LoadError> {
    load_config_from_str(DEFAULT_CONFIG_RON)
}
