//! Allocation of zonal reservoir inflows to hydro storage plants.
//!
//! Each plant receives the zone's inflow series scaled by its share of the
//! zone's installed hydro storage output capacity in the model year. A zone
//! whose hydro fleet has no capacity gets zero inflow for every plant.

use medea_core::MedeaResult;
use medea_scenarios::ScenarioConfig;
use medea_ts::HourlySeries;
use rayon::prelude::*;
use tracing::warn;

use crate::technology::{Catalog, CapacityTable, INSTALLED_CAPACITY_OUT};

pub const INFLOW_PRODUCT: &str = "inflows";
pub const INFLOW_SERIES: &str = "reservoir";

#[derive(Debug, Clone, PartialEq)]
pub struct PlantInflow {
    pub zone: String,
    pub technology: String,
    pub share: f64,
    pub values: Vec<Option<f64>>,
}

/// Capacity shares of `plants` within one zone. Missing capacities count as 0.
pub fn capacity_shares(
    capacity: &CapacityTable,
    plants: &[String],
    zone: &str,
    year: i32,
) -> MedeaResult<Vec<f64>> {
    let row = capacity.require_row(INSTALLED_CAPACITY_OUT, zone, year)?;
    let installed = plants
        .iter()
        .map(|plant| capacity.value(row, plant).map(|c| c.unwrap_or(0.0)))
        .collect::<MedeaResult<Vec<f64>>>()?;
    let total: f64 = installed.iter().sum();
    if total == 0.0 {
        warn!("zone {zone}: hydro storage capacity is zero in {year}, allocating no inflow");
        return Ok(vec![0.0; plants.len()]);
    }
    Ok(installed.into_iter().map(|c| c / total).collect())
}

pub fn allocate_inflows(
    catalog: &Catalog<'_>,
    capacity: &CapacityTable,
    series: &HourlySeries,
    config: &ScenarioConfig,
) -> MedeaResult<Vec<PlantInflow>> {
    let plants = catalog.hydro_storage()?;
    if plants.is_empty() {
        return Ok(Vec::new());
    }

    let per_zone: Vec<Vec<PlantInflow>> = config
        .zones
        .par_iter()
        .map(|zone| -> MedeaResult<Vec<PlantInflow>> {
            let shares = capacity_shares(capacity, &plants, zone, config.year)?;
            let inflow = series
                .zonal()
                .require(zone, INFLOW_PRODUCT, INFLOW_SERIES)?;
            Ok(plants
                .iter()
                .zip(shares)
                .map(|(plant, share)| PlantInflow {
                    zone: zone.clone(),
                    technology: plant.clone(),
                    share,
                    values: inflow.iter().map(|v| v.map(|x| x * share)).collect(),
                })
                .collect())
        })
        .collect::<MedeaResult<_>>()?;

    Ok(per_zone.into_iter().flatten().collect())
}
