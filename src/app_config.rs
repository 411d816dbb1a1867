use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use url::Url;

use crate::providers::openai::PLACEHOLDER_API_KEY;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Settings storage config
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Chat-completion service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Service endpoint URL (e.g. for Azure OpenAI or a compatible local server)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name (e.g., "gpt-4", "gpt-4o")
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Output token cap per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature parameter for text generation
    /// Lower values make output more deterministic
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl TranslationConfig {
    /// Get the API key from the configured environment variable
    ///
    /// Falls back to a placeholder that makes every live request fail.
    pub fn api_key(&self) -> String {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER_API_KEY.to_string())
    }
}

/// Settings storage configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// Database file; empty means the default location in the user's data directory
    #[serde(default)]
    pub database_path: String,
}

impl StorageConfig {
    /// Configured database path, if any
    pub fn database_path(&self) -> Option<PathBuf> {
        let trimmed = self.database_path.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_endpoint() -> String {
    crate::providers::openai::DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.3
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))
    }

    /// Load the config file, or create it with defaults when it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        log::warn!("Config file not found at {:?}, creating default config.", path);
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let endpoint = Url::parse(&self.translation.endpoint)
            .with_context(|| format!("Invalid translation endpoint: {}", self.translation.endpoint))?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(anyhow!("Translation endpoint must use http or https: {}", endpoint));
        }

        if self.translation.model.trim().is_empty() {
            return Err(anyhow!("Translation model must not be empty"));
        }

        if self.translation.max_tokens == 0 {
            return Err(anyhow!("max_tokens must be greater than zero"));
        }

        if !(0.0..=2.0).contains(&self.translation.temperature) {
            return Err(anyhow!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.translation.temperature
            ));
        }

        if self.translation.api_key_env.trim().is_empty() {
            return Err(anyhow!("api_key_env must name an environment variable"));
        }

        Ok(())
    }
}
