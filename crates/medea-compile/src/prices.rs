//! Per-zone fuel price curves.
//!
//! Base series come from the time series columns, or from the configured flat
//! placeholder prices which take precedence. A zone's curve adds the fuel's
//! transport cost for that zone when the transport-cost table lists the fuel.

use std::collections::HashMap;

use medea_core::{MedeaError, MedeaResult, RawTable};
use medea_scenarios::ScenarioConfig;
use medea_ts::HourlySeries;
use rayon::prelude::*;
use tracing::debug;

/// Price column holding CO2 certificate prices.
pub const CO2_PRICE: &str = "EUA";
/// Price column holding wholesale day-ahead prices.
pub const DAY_AHEAD_PRICE: &str = "price_day_ahead";

#[derive(Debug, Clone, PartialEq)]
pub struct PriceCurve {
    pub fuel: String,
    pub zone: String,
    pub values: Vec<Option<f64>>,
}

/// Price curves for the full fuel × zone cross product, fuel-major.
pub fn build_price_curves(
    series: &HourlySeries,
    transport_cost: Option<&RawTable>,
    config: &ScenarioConfig,
) -> MedeaResult<Vec<PriceCurve>> {
    let fuels = &config.constants.price_fuels;
    let transport = transport_costs(transport_cost, fuels, &config.zones)?;

    let mut base = HashMap::with_capacity(fuels.len());
    for fuel in fuels {
        let fixed = config
            .constants
            .fixed_prices
            .iter()
            .find(|p| &p.fuel == fuel)
            .map(|p| p.price);
        let values = match fixed {
            Some(price) => vec![Some(price); series.len()],
            None => series.column(fuel)?.to_vec(),
        };
        base.insert(fuel.as_str(), values);
    }

    let by_zone: Vec<Vec<PriceCurve>> = config
        .zones
        .par_iter()
        .map(|zone| {
            fuels
                .iter()
                .map(|fuel| {
                    let base = &base[fuel.as_str()];
                    let values = match transport.get(&(fuel.as_str(), zone.as_str())) {
                        Some(cost) => base.iter().map(|v| v.map(|p| p + cost)).collect(),
                        None => base.clone(),
                    };
                    PriceCurve {
                        fuel: fuel.clone(),
                        zone: zone.clone(),
                        values,
                    }
                })
                .collect()
        })
        .collect();

    let mut curves = Vec::with_capacity(fuels.len() * config.zones.len());
    for (fuel_idx, _) in fuels.iter().enumerate() {
        for zone_curves in &by_zone {
            curves.push(zone_curves[fuel_idx].clone());
        }
    }
    debug!("built {} price curves", curves.len());
    Ok(curves)
}

/// Transport cost per (fuel, zone) for every fuel listed in the table. A listed
/// fuel must have a cost for every zone.
fn transport_costs<'a>(
    table: Option<&RawTable>,
    fuels: &'a [String],
    zones: &'a [String],
) -> MedeaResult<HashMap<(&'a str, &'a str), f64>> {
    let mut costs = HashMap::new();
    let Some(table) = table else {
        return Ok(costs);
    };
    let listed = table.key(0)?;
    for fuel in fuels {
        let Some(row) = listed.iter().position(|f| f.as_deref() == Some(fuel.as_str())) else {
            continue;
        };
        for zone in zones {
            let cost = table.numeric(zone)?[row].ok_or_else(|| {
                MedeaError::lookup(format!(
                    "{}: no transport cost for '{fuel}' in zone '{zone}'",
                    table.name()
                ))
            })?;
            costs.insert((fuel.as_str(), zone.as_str()), cost);
        }
    }
    Ok(costs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixture, fixture_config};
    use medea_ts::process_timeseries;

    fn curves() -> Vec<PriceCurve> {
        let tables = fixture();
        let config = fixture_config();
        let series = process_timeseries(&tables.timeseries, &config).unwrap();
        build_price_curves(&series, tables.transport_cost.as_ref(), &config).unwrap()
    }

    fn curve<'a>(curves: &'a [PriceCurve], fuel: &str, zone: &str) -> &'a PriceCurve {
        curves
            .iter()
            .find(|c| c.fuel == fuel && c.zone == zone)
            .unwrap()
    }

    #[test]
    fn full_cross_product_fuel_major() {
        let curves = curves();
        assert_eq!(curves.len(), 8 * 2);
        assert_eq!((curves[0].fuel.as_str(), curves[0].zone.as_str()), ("Coal", "AT"));
        assert_eq!((curves[1].fuel.as_str(), curves[1].zone.as_str()), ("Coal", "DE"));
    }

    #[test]
    fn fuel_without_transport_cost_equals_base() {
        let tables = fixture();
        let config = fixture_config();
        let series = process_timeseries(&tables.timeseries, &config).unwrap();
        let curves = curves();
        assert_eq!(
            curve(&curves, "Coal", "AT").values.as_slice(),
            series.column("Coal").unwrap()
        );
    }

    #[test]
    fn transport_cost_is_added() {
        let tables = fixture();
        let config = fixture_config();
        let series = process_timeseries(&tables.timeseries, &config).unwrap();
        let curves = curves();
        let gas = series.column("Gas").unwrap();
        let at = &curve(&curves, "Gas", "AT").values;
        assert!(gas
            .iter()
            .zip(at)
            .all(|(b, p)| (b.unwrap() + 0.5 - p.unwrap()).abs() < 1e-12));
    }

    #[test]
    fn fixed_prices_combine_with_transport() {
        let curves = curves();
        assert!(curve(&curves, "Nuclear", "DE")
            .values
            .iter()
            .all(|v| *v == Some(3.5)));
        assert!(curve(&curves, "Lignite", "AT")
            .values
            .iter()
            .all(|v| *v == Some(5.5)));
    }

    #[test]
    fn missing_base_column_is_lookup_error() {
        let tables = fixture();
        let mut config = fixture_config();
        config.constants.price_fuels.push("Hydrogen".to_string());
        let series = process_timeseries(&tables.timeseries, &config).unwrap();
        let err = build_price_curves(&series, None, &config).unwrap_err();
        assert!(matches!(err, MedeaError::Lookup(_)));
    }
}
