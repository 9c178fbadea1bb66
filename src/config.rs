use crate::model::ConfigError;
use crate::pipeline::DEFAULT_CHUNK_SIZE;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// JSON list of raw offers from the extraction step.
    pub offers_path: String,
    /// JSON list of shopping-list matches from the matcher, if any.
    #[serde(default)]
    pub matches_path: Option<String>,
    /// Report destination; stdout when absent.
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_parallel() -> bool {
    true
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_currency() -> String {
    "EUR".to_string()
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    if config.offers_path.trim().is_empty() {
        return Err(ConfigError::Invalid("offers_path is empty".into()));
    }
    if config.chunk_size == 0 {
        return Err(ConfigError::Invalid("chunk_size must be greater than 0".into()));
    }
    Ok(config)
}
