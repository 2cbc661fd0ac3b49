//! Small in-memory input tables shared by the unit tests.

use chrono::{Duration, TimeZone, Utc};
use medea_core::{RawTable, RawTables};
use medea_scenarios::ScenarioConfig;
use polars::prelude::*;

pub fn fixture_config() -> ScenarioConfig {
    ScenarioConfig::new("/srv/medea", "timeseries_regional.csv", &["AT", "DE"], 2015)
}

fn technology() -> DataFrame {
    let none = None::<f64>;
    df![
        "technology" => &[Some("nuc"), Some("lig_chp"), Some("ng_chp"), Some("wind_on"), Some("pv"), None,
                          Some("ror"), Some("hydro_res"), Some("hydro_psp"), Some("battery"), Some("ng_boiler"),
                          Some("transmission")],
        "fuel" => &[Some("Nuclear"), Some("Lignite"), Some("Gas"), Some("Wind"), Some("Solar"), None,
                    Some("Water"), Some("Water"), Some("Water"), Some("Power"), Some("Gas"), Some("Power")],
        "primary_product" => &[Some("el"), Some("el"), Some("el"), Some("el"), Some("el"), None,
                               Some("el"), Some("el"), Some("el"), Some("el"), Some("ht"), Some("el")],
        "conventional" => &[Some(1.0), Some(1.0), Some(1.0), Some(0.0), Some(0.0), none,
                            Some(0.0), Some(0.0), Some(0.0), Some(0.0), Some(1.0), Some(0.0)],
        "intermittent" => &[Some(0.0), Some(0.0), Some(0.0), Some(1.0), Some(1.0), none,
                            Some(1.0), Some(0.0), Some(0.0), Some(0.0), Some(0.0), Some(0.0)],
        "storage" => &[Some(0.0), Some(0.0), Some(0.0), Some(0.0), Some(0.0), none,
                       Some(0.0), Some(1.0), Some(1.0), Some(1.0), Some(0.0), Some(0.0)],
        "transmission" => &[Some(0.0), Some(0.0), Some(0.0), Some(0.0), Some(0.0), none,
                            Some(0.0), Some(0.0), Some(0.0), Some(0.0), Some(0.0), Some(1.0)],
        "heat_generation" => &[Some(0.0), Some(1.0), Some(1.0), Some(0.0), Some(0.0), none,
                               Some(0.0), Some(0.0), Some(0.0), Some(0.0), Some(0.0), Some(0.0)],
        "eta_ec" => &[Some(0.33), Some(0.40), Some(0.45), none, none, none,
                      none, Some(0.85), Some(0.8), Some(0.9), Some(0.9), none],
        "eqacapex_p" => &[Some(400.0), Some(300.0), Some(123.456789), Some(90.0), Some(60.0), none,
                          Some(200.0), Some(150.0), Some(120.0), Some(50.0), Some(20.0), Some(2.5)],
        "eqacapex_e" => &[none, none, none, none, none, none,
                          none, Some(10.0), Some(5.0), Some(20.0), none, none],
        "opex_f" => &[Some(10.0), Some(8.0), Some(5.0), Some(2.0), Some(1.0), none,
                      Some(3.0), Some(4.0), Some(4.0), Some(1.0), Some(1.0), Some(0.0)],
        "opex_v" => &[Some(1.0), Some(2.0), Some(3.0), Some(0.0), Some(0.0), none,
                      Some(0.0), Some(0.0), Some(0.0), Some(0.0), Some(1.0), Some(0.0)],
        "lifetime" => &[Some(40.0), Some(40.0), Some(30.0), Some(25.0), Some(25.0), none,
                        Some(60.0), Some(60.0), Some(60.0), Some(15.0), Some(30.0), Some(40.0)],
    ]
    .unwrap()
}

fn operating_region() -> DataFrame {
    df![
        "c" => &["ng_chp", "ng_chp", "ng_chp", "ng_chp", "lig_chp", "lig_chp"],
        "f" => &["Gas", "Gas", "Gas", "Gas", "Lignite", "Lignite"],
        "l" => &["l1", "l2", "l3", "l4", "l1", "l2"],
        "fuel" => &[0.0, 1.8, 2.0, 0.9, 0.0, 2.5],
        "el" => &[0.0, 0.8, 0.6, 0.2, 0.0, 1.0],
        "ht" => &[0.0, 0.0, 0.9, 0.6, 0.0, 0.5],
    ]
    .unwrap()
}

fn capacity() -> DataFrame {
    capacity_with_at_hydro(2.0, 6.0)
}

/// Capacity table whose 2015 AT hydro output capacities are `res` and `psp`.
fn capacity_with_at_hydro(res: f64, psp: f64) -> DataFrame {
    let out = "Installed Capacity Out";
    let inn = "Installed Capacity In";
    let sc = "Storage Capacity";
    df![
        "kind" => &[out, out, inn, inn, sc, sc, out, out],
        "zone" => &["AT", "DE", "AT", "DE", "AT", "DE", "CH", "AT"],
        "year" => &[2015i64, 2015, 2015, 2015, 2015, 2015, 2015, 2016],
        "pv" => &[Some(1.1), Some(40.0), None, None, None, None, Some(1.0), None],
        "hydro_res" => &[Some(res), Some(1.0), Some(0.0), Some(0.0), Some(800.0), Some(200.0), Some(4.0), None],
        "hydro_psp" => &[Some(psp), Some(3.0), Some(5.0), Some(3.5), Some(100.0), Some(40.0), Some(1.5), None],
        "battery" => &[Some(0.5), None, Some(0.5), None, Some(1.0), None, None, None],
    ]
    .unwrap()
}

fn transmission() -> DataFrame {
    df![
        "from" => &["AT", "DE", "DE", "CH"],
        "to" => &["DE", "AT", "CH", "DE"],
        "ATC" => &[4900.0, 4900.0, 4000.0, 4000.0],
        "distance" => &[500.0, 500.0, 300.0, 300.0],
    ]
    .unwrap()
}

fn external_cost() -> DataFrame {
    df![
        "technology" => &["nuc", "lig_chp", "ng_chp"],
        "fixed cost" => &[Some(1.0), None, Some(2.0)],
        "variable cost" => &[0.5, 12.0, 5.0],
        "CO2_intensity" => &[0.0, 0.4, 0.2],
    ]
    .unwrap()
}

fn transport_cost() -> DataFrame {
    df![
        "fuel" => &["Gas", "Lignite"],
        "AT" => &[0.5, 1.0],
        "DE" => &[0.2, 0.0],
    ]
    .unwrap()
}

/// Hourly series for 2015 plus one stray hour on either side of the year.
///
/// Kept row `k` (0-based) carries: AT load `5 + k % 24` with a 99.5 spike at
/// `k = 100`, DE load 45.5, flat reservoir inflows of 4 (AT) and 8 (DE).
/// The stray hours carry an AT load of 1000 so a broken year filter shows up
/// in the peak load.
pub fn timeseries() -> DataFrame {
    let hours = 8760;
    let first = Utc.with_ymd_and_hms(2014, 12, 31, 23, 0, 0).unwrap();
    let total = hours + 2;
    let stamps: Vec<String> = (0..total)
        .map(|i| (first + Duration::hours(i as i64)).to_rfc3339())
        .collect();
    let in_year = |i: usize| i >= 1 && i <= hours;
    let kept = |i: usize| i.saturating_sub(1);

    let at_load: Vec<f64> = (0..total)
        .map(|i| match (in_year(i), kept(i)) {
            (false, _) => 1000.0,
            (true, 100) => 99.5,
            (true, k) => 5.0 + (k % 24) as f64,
        })
        .collect();
    let at_pv: Vec<f64> = (0..total).map(|i| (kept(i) % 24) as f64 / 23.0).collect();
    let coal: Vec<f64> = (0..total).map(|i| 7.0 + (i % 3) as f64).collect();
    let flat = |value: f64| vec![value; total];

    df![
        "DateTime" => stamps,
        "DE-power-load" => flat(45.5),
        "AT-power-load" => at_load,
        "AT-heat-load" => flat(2.0),
        "DE-heat-load" => flat(3.0),
        "AT-wind_on-profile" => flat(0.123456),
        "DE-wind_on-profile" => flat(0.8),
        "AT-pv-profile" => at_pv,
        "AT-ror-profile" => flat(0.5),
        "AT-inflows-reservoir" => flat(4.0),
        "DE-inflows-reservoir" => flat(8.0),
        "CH-power-load" => flat(1.0),
        "Coal" => coal,
        "Oil" => flat(30.0),
        "Gas" => flat(20.123456),
        "EUA" => flat(5.0),
        "price_day_ahead" => flat(31.0),
    ]
    .unwrap()
}

pub fn fixture() -> RawTables {
    RawTables {
        capacity: RawTable::new("capacities", capacity(), 3).unwrap(),
        transmission: RawTable::new("transmission", transmission(), 2).unwrap(),
        technology: RawTable::new("technologies", technology(), 1).unwrap(),
        operating_region: RawTable::new("operating_region", operating_region(), 3).unwrap(),
        external_cost: RawTable::new("external_cost", external_cost(), 1).unwrap(),
        transport_cost: Some(RawTable::new("cost_transport", transport_cost(), 1).unwrap()),
        timeseries: timeseries(),
    }
}

/// The standard fixture with no installed hydro storage capacity in AT.
pub fn fixture_without_at_hydro() -> RawTables {
    RawTables {
        capacity: RawTable::new("capacities", capacity_with_at_hydro(0.0, 0.0), 3).unwrap(),
        ..fixture()
    }
}
