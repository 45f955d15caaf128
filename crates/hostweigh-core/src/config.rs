//! weigh.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Weigher selection and per-weigher parameters.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WeighConfig {
    /// Weigher names to run, resolved by the registry. `"all"` selects
    /// every registered weigher.
    pub weighers: Vec<String>,
    pub ram: RamConfig,
    pub io_ops: IoOpsConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RamConfig {
    /// Positive spreads instances, negative stacks them.
    pub weight_multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IoOpsConfig {
    /// Negative prefers idle hosts, positive prefers busy ones.
    pub weight_multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricsConfig {
    pub weight_multiplier: f64,
    /// Ordered `name=ratio` entries. Malformed entries are dropped.
    pub weight_setting: Vec<String>,
    /// Fail the pass when a host lacks a configured metric.
    pub required: bool,
    /// Raw score for a host missing a metric when `required` is false.
    /// Unset means the missing metric contributes zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_of_unavailable: Option<f64>,
}

impl Default for WeighConfig {
    fn default() -> Self {
        Self {
            weighers: vec!["all".to_string()],
            ram: RamConfig::default(),
            io_ops: IoOpsConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for RamConfig {
    fn default() -> Self {
        Self { weight_multiplier: 1.0 }
    }
}

impl Default for IoOpsConfig {
    fn default() -> Self {
        Self { weight_multiplier: -1.0 }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            weight_multiplier: 1.0,
            weight_setting: Vec::new(),
            required: true,
            weight_of_unavailable: None,
        }
    }
}

impl WeighConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: WeighConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
