use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::RetryConfig;
use crate::models::ValidationLimits;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub training: TrainingConfig,

    #[serde(default)]
    pub validation: ValidationLimits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    #[serde(default = "default_rest_seconds")]
    pub default_rest_seconds: u64,

    #[serde(default = "default_weight_unit")]
    pub weight_unit: String,

    /// Poll interval of the rest timer display
    #[serde(default = "default_tick_millis")]
    pub timer_tick_millis: u64,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_rest_seconds() -> u64 {
    90
}

fn default_weight_unit() -> String {
    "kg".to_string()
}

fn default_tick_millis() -> u64 {
    1000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            retry: RetryConfig::default(),
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            default_rest_seconds: default_rest_seconds(),
            weight_unit: default_weight_unit(),
            timer_tick_millis: default_tick_millis(),
        }
    }
}

impl TrainingConfig {
    /// Convert a weight typed in the configured unit to kilograms
    pub fn to_kg(&self, weight: f64) -> f64 {
        match self.weight_unit.to_lowercase().as_str() {
            "lb" | "lbs" => weight * 0.453_592_37,
            _ => weight,
        }
    }
}

impl Config {
    /// Get config directory path (~/.ironlog/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".ironlog"))
    }

    /// Get config file path (~/.ironlog/config.toml)
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolve the config file, preferring an explicit override
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::config_file(),
        }
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("Config file not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }
}
