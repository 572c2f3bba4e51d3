use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_PROVIDER_URL: &str = "https://v6.exchangerate-api.com";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_url")]
    pub base_url: String,
    pub api_key: String,
}

fn default_provider_url() -> String {
    DEFAULT_PROVIDER_URL.to_string()
}

fn default_base_currency() -> String {
    "USD".to_string()
}

/// Initial state of the conversion form.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConversionDefaults {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

impl Default for ConversionDefaults {
    fn default() -> Self {
        ConversionDefaults {
            from: "USD".to_string(),
            to: "BRL".to_string(),
            amount: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    #[serde(default)]
    pub defaults: ConversionDefaults,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "conversor", "conversor")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
