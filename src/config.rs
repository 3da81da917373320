//! Run configuration, read from an optional JSON file.
//!
//! ```json
//! {
//!   "forecast_dir": "forecasts",
//!   "file_template": "weather_data_forecast_{lead}day.csv",
//!   "output_dir": "reports",
//!   "ranking_size": 10,
//!   "map_size": 25,
//!   "zero_temperature_epsilon": 1e-9
//! }
//! ```
//!
//! Every field is optional and falls back to the value shown.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub forecast_dir: PathBuf,
    /// Snapshot file name, `{lead}` is replaced by 1..=5.
    pub file_template: String,
    pub output_dir: PathBuf,
    /// Length of best/worst city lists.
    pub ranking_size: usize,
    /// Cities per side of the geographic top/bottom partition.
    pub map_size: usize,
    /// Reference temperatures this close to zero are not scored.
    pub zero_temperature_epsilon: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            forecast_dir: PathBuf::from("forecasts"),
            file_template: "weather_data_forecast_{lead}day.csv".to_string(),
            output_dir: PathBuf::from("reports"),
            ranking_size: 10,
            map_size: 25,
            zero_temperature_epsilon: 1e-9,
        }
    }
}

impl PipelineConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: PipelineConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.file_template.contains("{lead}") {
            anyhow::bail!("file_template '{}' has no {{lead}} placeholder", self.file_template);
        }
        if !(self.zero_temperature_epsilon >= 0.0 && self.zero_temperature_epsilon.is_finite()) {
            anyhow::bail!(
                "zero_temperature_epsilon must be a finite non-negative number, got {}",
                self.zero_temperature_epsilon
            );
        }
        Ok(())
    }
}
