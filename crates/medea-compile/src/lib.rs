//! # medea-compile: raw tables to model symbols
//!
//! [`compile_symbols`] runs the full pipeline over already-loaded
//! [`RawTables`] and a validated [`ScenarioConfig`]:
//!
//! | stage | module |
//! |-------|--------|
//! | label categories | [`sets`] |
//! | catalog, capacities, operating regions, links | [`technology`] |
//! | hourly series (year filter, resolution check, zonal split) | `medea_ts` |
//! | fuel price curves | [`prices`] |
//! | reservoir inflow allocation | [`inflows`] |
//! | peak load and peak profiles | [`peaks`] |
//! | investment limits | [`invest`] |
//! | parameter collation | [`assemble`] |
//!
//! The pipeline never touches disk; loading and export live in `medea-io`.
//! Every error aborts the call, so a returned [`Symbols`] is always complete
//! and has passed category membership validation.

pub mod assemble;
pub mod inflows;
pub mod invest;
pub mod peaks;
pub mod prices;
pub mod sets;
pub mod technology;

#[cfg(test)]
mod test_utils;

use medea_core::{MedeaResult, RawTables, Symbols};
use medea_scenarios::ScenarioConfig;
use medea_ts::process_timeseries;
use tracing::info;

pub use assemble::{assemble_parameters, Derived};
pub use inflows::{allocate_inflows, capacity_shares, PlantInflow};
pub use invest::{build_investment_limits, InvestmentLimits, LimitMatrix};
pub use peaks::{extract_peaks, Peaks};
pub use prices::{build_price_curves, PriceCurve};
pub use sets::build_sets;
pub use technology::{
    fuel_need, operating_regions, transmission_links, CapacityTable, Catalog, OperatingRegionRow,
    TransmissionLink,
};

/// Compile raw input tables into the model's sets and parameters.
pub fn compile_symbols(tables: &RawTables, config: &ScenarioConfig) -> MedeaResult<Symbols> {
    config.validate()?;
    info!(
        "compiling symbols for {} in {}",
        config.zones.join(", "),
        config.year
    );

    let catalog = Catalog::new(&tables.technology)?;
    let regions = operating_regions(&tables.operating_region)?;
    let sets = build_sets(&catalog, &regions, config)?;
    info!("built {} label categories", sets.len());

    let series = process_timeseries(&tables.timeseries, config)?;
    let need = fuel_need(&catalog, &regions)?;
    let links = transmission_links(
        &tables.transmission,
        &config.zones,
        config.constants.atc_unit_divisor,
    )?;
    let prices = build_price_curves(&series, tables.transport_cost.as_ref(), config)?;

    let capacity = CapacityTable::new(&tables.capacity)?;
    let inflows = allocate_inflows(&catalog, &capacity, &series, config)?;
    let peaks = extract_peaks(series.zonal(), &config.zones)?;
    let limits = build_investment_limits(&config.invest, &sets)?;

    let derived = Derived {
        catalog: &catalog,
        capacity: &capacity,
        external_cost: &tables.external_cost,
        regions: &regions,
        fuel_need: &need,
        links: &links,
        series: &series,
        prices: &prices,
        inflows: &inflows,
        peaks: &peaks,
        limits: &limits,
    };
    let parameters = assemble_parameters(&derived, &sets, config)?;

    let symbols = Symbols { sets, parameters };
    symbols.validate()?;
    info!(
        "compiled {} sets and {} parameters",
        symbols.sets.len(),
        symbols.parameters.len()
    );
    Ok(symbols)
}
