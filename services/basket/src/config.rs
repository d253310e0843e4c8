use crate::dataset::DatasetConfig;
use crate::mining::{AprioriConfig, RuleSource};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub mining: AprioriConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    /// Present when the run should not prompt for thresholds.
    #[serde(default)]
    pub thresholds: Option<ThresholdsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub source: RuleSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ThresholdsConfig {
    pub min_support: f64,
    pub min_confidence: f64,
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
