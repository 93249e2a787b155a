//! CLI configuration loaded from an optional TOML file

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use streetchain_core::EncoderConfig;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub encoder: EncoderConfig,
    pub geocoding: GeocodingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    /// JSON address book used when no `--address-book` is given
    pub address_book: Option<PathBuf>,
    /// Maximum distance to a known address, meters
    pub max_distance: f64,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            address_book: None,
            max_distance: 150.0,
        }
    }
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
