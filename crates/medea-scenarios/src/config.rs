use anyhow::{Context, Result};
use medea_core::{MedeaError, MedeaResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::PipelineConstants;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Project root; raw tables live under `<root_dir>/data/raw`.
    pub root_dir: PathBuf,
    /// Path to the regional hourly time series CSV.
    pub timeseries: PathBuf,
    #[serde(default = "default_zones")]
    pub zones: Vec<String>,
    #[serde(default = "default_year")]
    pub year: i32,
    #[serde(default)]
    pub invest: InvestmentSwitches,
    #[serde(default)]
    pub constants: PipelineConstants,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentSwitches {
    #[serde(default = "enabled")]
    pub conventionals: bool,
    #[serde(default = "enabled")]
    pub renewables: bool,
    #[serde(default = "enabled")]
    pub storage: bool,
    /// Transmission capacity between zones.
    #[serde(default = "enabled")]
    pub transmission: bool,
}

fn enabled() -> bool {
    true
}

fn default_zones() -> Vec<String> {
    vec!["AT".to_string(), "DE".to_string()]
}

fn default_year() -> i32 {
    2016
}

impl Default for InvestmentSwitches {
    fn default() -> Self {
        Self {
            conventionals: true,
            renewables: true,
            storage: true,
            transmission: true,
        }
    }
}

impl ScenarioConfig {
    pub fn new(
        root_dir: impl Into<PathBuf>,
        timeseries: impl Into<PathBuf>,
        zones: &[&str],
        year: i32,
    ) -> Self {
        Self {
            root_dir: root_dir.into(),
            timeseries: timeseries.into(),
            zones: zones.iter().map(|z| z.to_string()).collect(),
            year,
            invest: InvestmentSwitches::default(),
            constants: PipelineConstants::default(),
        }
    }

    pub fn with_investment(mut self, invest: InvestmentSwitches) -> Self {
        self.invest = invest;
        self
    }

    pub fn raw_data_dir(&self) -> PathBuf {
        self.root_dir.join("data").join("raw")
    }

    /// Structural checks on the configuration itself.
    pub fn validate(&self) -> MedeaResult<()> {
        if self.zones.is_empty() {
            return Err(MedeaError::Config("at least one zone is required".into()));
        }
        let mut seen = HashSet::new();
        for zone in &self.zones {
            if zone.trim().is_empty() || zone.contains('-') {
                return Err(MedeaError::Config(format!(
                    "invalid zone code '{zone}'; zone codes must be non-empty and contain no '-'"
                )));
            }
            if !seen.insert(zone.as_str()) {
                return Err(MedeaError::Config(format!("duplicate zone '{zone}'")));
            }
        }
        if !(1..=9999).contains(&self.year) {
            return Err(MedeaError::Config(format!(
                "model year {} is out of range",
                self.year
            )));
        }
        let factor = self.constants.demand_correction.factor;
        if !factor.is_finite() || factor <= 0.0 {
            return Err(MedeaError::Config(format!(
                "demand correction factor must be positive, got {factor}"
            )));
        }
        let divisor = self.constants.atc_unit_divisor;
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(MedeaError::Config(format!(
                "transmission unit divisor must be positive, got {divisor}"
            )));
        }
        Ok(())
    }

    fn resolve_relative_to(mut self, base: &Path) -> Self {
        if self.root_dir.is_relative() {
            self.root_dir = base.join(&self.root_dir);
        }
        if self.timeseries.is_relative() {
            self.timeseries = base.join(&self.timeseries);
        }
        self
    }
}

/// Read a scenario file (YAML or JSON). Relative paths inside it are resolved
/// against the file's directory.
pub fn load_config_from_path(path: &Path) -> Result<ScenarioConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading scenario config '{}'", path.display()))?;
    let config: ScenarioConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            serde_yaml::from_str(&data).context("parsing scenario config yaml")?
        }
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            serde_json::from_str(&data).context("parsing scenario config json")?
        }
        _ => serde_yaml::from_str(&data)
            .or_else(|_| serde_json::from_str(&data))
            .context("parsing scenario config")?,
    };
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let config = config.resolve_relative_to(base);
    config
        .validate()
        .with_context(|| format!("validating scenario config '{}'", path.display()))?;
    Ok(config)
}
