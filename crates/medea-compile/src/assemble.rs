//! Collation of all derived series into the named parameter mapping.
//!
//! Every parameter is built directly in long form with its dimensions in the
//! model's canonical order: zone before hour before technology/fuel/product.
//! Time-varying parameters and `CAPITALCOST` are rounded to the configured
//! number of decimals; everything else keeps raw precision.

use medea_core::{numeric_label, LabelSet, MedeaResult, Parameter, Parameters, RawTable, Sets};
use medea_scenarios::ScenarioConfig;
use medea_ts::HourlySeries;
use tracing::info;

use crate::inflows::PlantInflow;
use crate::invest::{InvestmentLimits, LimitMatrix};
use crate::peaks::Peaks;
use crate::prices::{PriceCurve, CO2_PRICE, DAY_AHEAD_PRICE};
use crate::technology::{
    Catalog, CapacityTable, OperatingRegionRow, TransmissionLink, INSTALLED_CAPACITY_IN,
    INSTALLED_CAPACITY_OUT, STORAGE_CAPACITY,
};

/// Everything the assembler reads, borrowed from the pipeline stages.
pub struct Derived<'a> {
    pub catalog: &'a Catalog<'a>,
    pub capacity: &'a CapacityTable,
    pub external_cost: &'a RawTable,
    pub regions: &'a [OperatingRegionRow],
    pub fuel_need: &'a [(OperatingRegionRow, f64)],
    pub links: &'a [TransmissionLink],
    pub series: &'a HourlySeries,
    pub prices: &'a [PriceCurve],
    pub inflows: &'a [PlantInflow],
    pub peaks: &'a Peaks,
    pub limits: &'a InvestmentLimits,
}

fn key(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

pub fn assemble_parameters(
    derived: &Derived<'_>,
    sets: &Sets,
    config: &ScenarioConfig,
) -> MedeaResult<Parameters> {
    let decimals = config.constants.rounding_decimals;
    let mut params = Parameters::new();

    technology_parameters(&mut params, derived.catalog, sets, decimals)?;
    external_cost_parameters(&mut params, derived.external_cost)?;
    capacity_parameters(&mut params, derived.capacity, sets, config)?;
    transmission_parameters(&mut params, derived.links)?;
    operating_region_parameters(&mut params, derived.regions, derived.fuel_need)?;
    hourly_parameters(&mut params, derived, decimals)?;
    peak_parameters(&mut params, derived.peaks)?;
    investment_parameters(&mut params, derived.limits)?;

    info!("assembled {} parameters", params.len());
    Ok(params)
}

/// One value per catalog technology, optionally restricted to a category.
fn per_technology(
    catalog: &Catalog<'_>,
    column: &str,
    dim: &str,
    within: Option<&LabelSet>,
) -> MedeaResult<Parameter> {
    let mut param = Parameter::new(&[dim]);
    for (tech, value) in catalog.numeric(column)? {
        if within.map_or(true, |set| set.contains(tech)) {
            if let Some(value) = value {
                param.insert(key(&[tech]), value)?;
            }
        }
    }
    Ok(param)
}

fn technology_parameters(
    params: &mut Parameters,
    catalog: &Catalog<'_>,
    sets: &Sets,
    decimals: u32,
) -> MedeaResult<()> {
    let storage = sets.get("s")?;
    let transmission = sets.get("g")?;
    params.insert(
        "CAPITALCOST",
        per_technology(catalog, "eqacapex_p", "t", None)?.rounded(decimals),
    );
    params.insert(
        "CAPITALCOST_E",
        per_technology(catalog, "eqacapex_e", "s", Some(storage))?,
    );
    params.insert(
        "CAPITALCOST_P",
        per_technology(catalog, "eqacapex_p", "s", Some(storage))?,
    );
    params.insert(
        "CAPITALCOST_X",
        per_technology(catalog, "eqacapex_p", "g", Some(transmission))?,
    );
    params.insert("COST_OM_QFIX", per_technology(catalog, "opex_f", "t", None)?);
    params.insert("COST_OM_VAR", per_technology(catalog, "opex_v", "t", None)?);
    params.insert("LIFETIME", per_technology(catalog, "lifetime", "t", None)?);
    Ok(())
}

fn external_cost_parameters(params: &mut Parameters, table: &RawTable) -> MedeaResult<()> {
    let technologies = table.key(0)?;
    for (name, column) in [
        ("AIR_POL_COST_FIX", "fixed cost"),
        ("AIR_POL_COST_VAR", "variable cost"),
        ("CO2_INTENSITY", "CO2_intensity"),
    ] {
        let mut param = Parameter::new(&["t"]);
        for (tech, value) in technologies.iter().zip(table.numeric(column)?) {
            if let (Some(tech), Some(value)) = (tech, value) {
                param.insert(key(&[tech]), value)?;
            }
        }
        params.insert(name, param);
    }
    Ok(())
}

fn capacity_parameters(
    params: &mut Parameters,
    capacity: &CapacityTable,
    sets: &Sets,
    config: &ScenarioConfig,
) -> MedeaResult<()> {
    let mut all = Parameter::new(&["kind", "z", "year", "t"]);
    for row in 0..capacity.len() {
        let (Some(kind), Some(zone), Some(year)) = capacity.row_key(row) else {
            continue;
        };
        if !config.zones.iter().any(|z| z == zone) {
            continue;
        }
        let year = numeric_label(year);
        for tech in capacity.technologies() {
            if let Some(value) = capacity.value(row, tech)? {
                all.insert(key(&[kind, zone, &year, tech]), value)?;
            }
        }
    }
    params.insert("CAPACITY", all);

    let storage = sets.get("s")?;
    for (name, kind) in [
        ("CAPACITY_STORAGE", STORAGE_CAPACITY),
        ("CAPACITY_STORE_IN", INSTALLED_CAPACITY_IN),
        ("CAPACITY_STORE_OUT", INSTALLED_CAPACITY_OUT),
    ] {
        let mut param = Parameter::new(&["z", "s"]);
        for zone in &config.zones {
            let row = capacity.require_row(kind, zone, config.year)?;
            for tech in storage.iter() {
                if let Some(value) = capacity.value(row, tech)? {
                    param.insert(key(&[zone, tech]), value)?;
                }
            }
        }
        params.insert(name, param);
    }
    Ok(())
}

fn transmission_parameters(params: &mut Parameters, links: &[TransmissionLink]) -> MedeaResult<()> {
    let mut capacity = Parameter::new(&["z", "z"]);
    let mut distance = Parameter::new(&["z", "z"]);
    for link in links {
        let pair = key(&[&link.from, &link.to]);
        if let Some(value) = link.capacity {
            capacity.insert(pair.clone(), value)?;
        }
        if let Some(value) = link.distance {
            distance.insert(pair, value)?;
        }
    }
    params.insert("CAPACITY_X", capacity);
    params.insert("DISTANCE", distance);
    Ok(())
}

fn operating_region_parameters(
    params: &mut Parameters,
    regions: &[OperatingRegionRow],
    fuel_need: &[(OperatingRegionRow, f64)],
) -> MedeaResult<()> {
    let mut input = Parameter::new(&["c", "carrier", "l"]);
    let mut output = Parameter::new(&["c", "l", "product"]);
    for row in regions {
        if let Some(fuel) = row.fuel {
            input.insert(key(&[&row.technology, &row.carrier, &row.region]), fuel)?;
        }
        for (product, value) in [("el", row.el), ("ht", row.ht)] {
            if let Some(value) = value {
                output.insert(key(&[&row.technology, &row.region, product]), value)?;
            }
        }
    }

    let mut need = Parameter::new(&["c", "carrier", "l"]);
    for (row, value) in fuel_need {
        need.insert(key(&[&row.technology, &row.carrier, &row.region]), *value)?;
    }

    params.insert("FEASIBLE_INPUT", input);
    params.insert("FEASIBLE_OUTPUT", output);
    params.insert("FUEL_NEED", need);
    Ok(())
}

/// Stack one hourly column into `param`, building each key from the hour label.
fn stack_hours<F>(
    param: &mut Parameter,
    hours: &LabelSet,
    values: &[Option<f64>],
    key_for: F,
) -> MedeaResult<()>
where
    F: Fn(&str) -> Vec<String>,
{
    for (hour, value) in hours.iter().zip(values) {
        if let Some(value) = value {
            param.insert(key_for(hour), *value)?;
        }
    }
    Ok(())
}

fn hourly_parameters(
    params: &mut Parameters,
    derived: &Derived<'_>,
    decimals: u32,
) -> MedeaResult<()> {
    let series = derived.series;
    let hours = series.hours();

    let mut demand = Parameter::new(&["z", "h", "product"]);
    for column in series.zonal().of_type("load") {
        let k = &column.key;
        stack_hours(&mut demand, hours, &column.values, |h| {
            key(&[&k.zone, h, &k.product])
        })?;
    }

    let mut profile = Parameter::new(&["z", "h", "t"]);
    for column in series.zonal().of_type("profile") {
        let k = &column.key;
        stack_hours(&mut profile, hours, &column.values, |h| {
            key(&[&k.zone, h, &k.product])
        })?;
    }

    let mut price = Parameter::new(&["z", "h", "fuel"]);
    let mut price_co2 = Parameter::new(&["z", "h"]);
    let mut price_day_ahead = Parameter::new(&["z", "h"]);
    for curve in derived.prices {
        let zone = curve.zone.as_str();
        match curve.fuel.as_str() {
            CO2_PRICE => stack_hours(&mut price_co2, hours, &curve.values, |h| key(&[zone, h]))?,
            DAY_AHEAD_PRICE => {
                stack_hours(&mut price_day_ahead, hours, &curve.values, |h| {
                    key(&[zone, h])
                })?
            }
            fuel => stack_hours(&mut price, hours, &curve.values, |h| key(&[zone, h, fuel]))?,
        }
    }

    let mut inflows = Parameter::new(&["z", "h", "s"]);
    for plant in derived.inflows {
        stack_hours(&mut inflows, hours, &plant.values, |h| {
            key(&[&plant.zone, h, &plant.technology])
        })?;
    }

    params.insert("DEMAND", demand.rounded(decimals));
    params.insert("PROFILE", profile.rounded(decimals));
    params.insert("PRICE", price.rounded(decimals));
    params.insert("PRICE_CO2", price_co2);
    params.insert("PRICE_DAY_AHEAD", price_day_ahead);
    params.insert("INFLOWS", inflows.rounded(decimals));
    Ok(())
}

fn peak_parameters(params: &mut Parameters, peaks: &Peaks) -> MedeaResult<()> {
    let mut load = Parameter::new(&["z"]);
    for (zone, value) in &peaks.load {
        load.insert(key(&[zone]), *value)?;
    }
    let mut profile = Parameter::new(&["z", "t"]);
    for (zone, tech, value) in &peaks.profile {
        profile.insert(key(&[zone, tech]), *value)?;
    }
    params.insert("PEAK_LOAD", load);
    params.insert("PEAK_PROFILE", profile);
    Ok(())
}

fn matrix(dims: &[&str], limits: &LimitMatrix) -> MedeaResult<Parameter> {
    let mut param = Parameter::new(dims);
    for (row, col, value) in limits.cells() {
        param.insert(key(&[row, col]), value)?;
    }
    Ok(param)
}

fn investment_parameters(params: &mut Parameters, limits: &InvestmentLimits) -> MedeaResult<()> {
    params.insert("SWITCH_INVEST", Parameter::scalar(limits.thermal)?);
    params.insert(
        "INVEST_LIMIT_RENEWABLE",
        matrix(&["z", "r"], &limits.intermittent)?,
    );
    params.insert("INVEST_LIMIT_STORAGE", matrix(&["z", "s"], &limits.storage)?);
    params.insert("INVEST_LIMIT_ATC", matrix(&["z", "z"], &limits.transmission)?);
    Ok(())
}
