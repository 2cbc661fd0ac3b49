pub mod config;
pub mod constants;

pub use config::{load_config_from_path, InvestmentSwitches, ScenarioConfig};
pub use constants::{DemandCorrection, FixedPrice, PipelineConstants};
