use crate::discovery::Algorithm;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Wall-clock ceiling checked before each row block.
    #[serde(default = "default_max_time_secs")]
    pub max_time_secs: u64,
    #[serde(default = "default_row_block_size")]
    pub row_block_size: usize,
    #[serde(default = "default_attribute_group_size")]
    pub attribute_group_size: usize,
    /// Chunking kicks in above this many rows...
    #[serde(default = "default_chunk_row_threshold")]
    pub chunk_row_threshold: usize,
    /// ...and above this many attributes.
    #[serde(default = "default_chunk_attribute_threshold")]
    pub chunk_attribute_threshold: usize,
    #[serde(default = "default_false")]
    pub force_chunked: bool,
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<Algorithm>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_path")]
    pub path: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config from {:?}", path.as_ref()))?;
        let config: Config = toml::from_str(&content)
            .context("Failed to parse config TOML")?;
        Ok(config)
    }
}

impl AnalysisConfig {
    pub fn max_time(&self) -> Duration {
        Duration::from_secs(self.max_time_secs)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_time_secs: default_max_time_secs(),
            row_block_size: default_row_block_size(),
            attribute_group_size: default_attribute_group_size(),
            chunk_row_threshold: default_chunk_row_threshold(),
            chunk_attribute_threshold: default_chunk_attribute_threshold(),
            force_chunked: default_false(),
            algorithms: default_algorithms(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: default_log_path(),
        }
    }
}

fn default_max_time_secs() -> u64 {
    5400
}

fn default_row_block_size() -> usize {
    300
}

fn default_attribute_group_size() -> usize {
    7
}

fn default_chunk_row_threshold() -> usize {
    100
}

fn default_chunk_attribute_threshold() -> usize {
    4
}

fn default_false() -> bool {
    false
}

fn default_algorithms() -> Vec<Algorithm> {
    vec![Algorithm::TopDown, Algorithm::BottomUp]
}

fn default_log_path() -> String {
    "mvd_log.txt".to_string()
}
