//! Configuration loading from TOML files

mod settings;
mod tables;

pub use settings::{load_settings, SimulatorSettings, SETTINGS_FILE};
pub use tables::{
    bundled_master_data, load_master_dir, load_rows, parse_json_rows, parse_master_data,
    parse_toml_rows, TableFile, STATS_TABLE, STONES_TABLE, TALISMANS_TABLE,
};

use crate::master::MasterDataError;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid master data: {0}")]
    MasterData(#[from] MasterDataError),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}
