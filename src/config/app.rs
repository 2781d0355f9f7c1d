//! Application configuration loading from config.toml
//!
//! Every key is optional. A missing file yields the defaults, so the service
//! runs with nothing but `DATABASE_URL` set.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_VAR: &str = "INSTACART_CONFIG";

/// Config file read when [`CONFIG_PATH_VAR`] is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Reporting engine settings
    pub reports: ReportConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the API listens on
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
        }
    }
}

/// How the staple time-of-day analysis selects order lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StapleMatch {
    /// Match order lines whose `product_id` equals one of the staple aisle ids
    /// that appears on some product. This reproduces the historical report output.
    #[default]
    AisleIdAsProductId,
    /// Match order lines whose product is shelved in one of the staple aisles.
    ProductAisle,
}

/// Reporting engine settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Aisle ids treated as "fruits, eggs, bread" staples
    pub staple_aisle_ids: Vec<i64>,
    /// Line selection rule for the staple analysis
    pub staple_match: StapleMatch,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            staple_aisle_ids: vec![24, 36, 94],
            staple_match: StapleMatch::default(),
        }
    }
}

/// Loads application configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads configuration from `$INSTACART_CONFIG` or `./config.toml`.
///
/// A missing file is not an error and produces [`AppConfig::default`].
pub fn load_default_config() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if !Path::new(&path).exists() {
        tracing::info!("No config file at {path}, using defaults");
        return Ok(AppConfig::default());
    }
    load_config(path)
}
