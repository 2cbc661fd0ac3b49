//! Label categories derived from the catalog and the scenario.

use std::collections::BTreeSet;

use medea_core::{hour_labels, LabelSet, MedeaResult, Sets};
use medea_scenarios::ScenarioConfig;

use crate::technology::{Catalog, OperatingRegionRow};

/// Number of feasible operating regions of co-generation plants.
pub const OPERATING_REGIONS: usize = 4;

pub fn build_sets(
    catalog: &Catalog<'_>,
    regions: &[OperatingRegionRow],
    config: &ScenarioConfig,
) -> MedeaResult<Sets> {
    let fuels = catalog.text("fuel")?;
    let products = catalog.text("primary_product")?;

    // sorted, as numpy's unique returns it
    let carriers: BTreeSet<String> = fuels
        .iter()
        .chain(products.iter())
        .filter_map(|(_, v)| v.clone())
        .collect();
    let final_energy: LabelSet = products.iter().filter_map(|(_, v)| v.clone()).collect();

    let mut sets = Sets::new();
    sets.insert("e", carriers.into_iter().collect());
    sets.insert("i", final_energy.clone());
    sets.insert("f", final_energy);
    sets.insert("t", catalog.names().iter().cloned().collect());
    sets.insert(
        "c",
        regions.iter().map(|r| r.technology.clone()).collect(),
    );
    sets.insert("d", catalog.flagged("conventional")?.into_iter().collect());
    sets.insert("r", catalog.flagged("intermittent")?.into_iter().collect());
    sets.insert("s", catalog.flagged("storage")?.into_iter().collect());
    sets.insert("g", catalog.flagged("transmission")?.into_iter().collect());
    sets.insert(
        "l",
        (1..=OPERATING_REGIONS).map(|x| format!("l{x}")).collect(),
    );
    sets.insert("h", hour_labels(config.year));
    sets.insert("z", config.zones.iter().cloned().collect());
    Ok(sets)
}
