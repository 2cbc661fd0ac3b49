//! Named pipeline constants.
//!
//! Values the compiler applies that do not come from any input table. Each has a
//! serde default so a scenario file only lists the ones it overrides.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConstants {
    #[serde(default)]
    pub demand_correction: DemandCorrection,
    /// Flat prices injected for fuels that have no market series yet.
    #[serde(default = "default_fixed_prices")]
    pub fixed_prices: Vec<FixedPrice>,
    /// Price columns turned into per-zone price curves, in output order.
    #[serde(default = "default_price_fuels")]
    pub price_fuels: Vec<String>,
    /// Raw transmission capacities are in MW; the model expects GW.
    #[serde(default = "default_atc_unit_divisor")]
    pub atc_unit_divisor: f64,
    /// Decimal places kept for time-varying parameters.
    #[serde(default = "default_rounding_decimals")]
    pub rounding_decimals: u32,
}

/// Load correction for losses and self-consumption.
///
/// The 0.91 factor follows the ENTSO-E note on load and consumption data
/// (`Load_and_Consumption_Data.pdf`); it still needs a better source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandCorrection {
    pub column: String,
    pub factor: f64,
}

impl Default for DemandCorrection {
    fn default() -> Self {
        Self {
            column: "DE-power-load".to_string(),
            factor: 0.91,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedPrice {
    pub fuel: String,
    pub price: f64,
}

// Placeholders until the time series input carries these prices.
fn default_fixed_prices() -> Vec<FixedPrice> {
    [("Nuclear", 3.5), ("Lignite", 4.5), ("Biomass", 6.5)]
        .into_iter()
        .map(|(fuel, price)| FixedPrice {
            fuel: fuel.to_string(),
            price,
        })
        .collect()
}

fn default_price_fuels() -> Vec<String> {
    [
        "Coal",
        "Oil",
        "Gas",
        "EUA",
        "Nuclear",
        "Lignite",
        "Biomass",
        "price_day_ahead",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn default_atc_unit_divisor() -> f64 {
    1000.0
}

fn default_rounding_decimals() -> u32 {
    4
}

impl Default for PipelineConstants {
    fn default() -> Self {
        Self {
            demand_correction: DemandCorrection::default(),
            fixed_prices: default_fixed_prices(),
            price_fuels: default_price_fuels(),
            atc_unit_divisor: default_atc_unit_divisor(),
            rounding_decimals: default_rounding_decimals(),
        }
    }
}
