use chrono::{Duration, NaiveDate};
use medea_compile::compile_symbols;
use medea_io::{load_raw_tables, write_symbols};
use medea_scenarios::load_config_from_path;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn repo_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join(relative)
}

/// Hourly 2015 series in the spreadsheet export layout (`;`, decimal comma).
fn write_timeseries(path: &Path) {
    let header = [
        "DateTime",
        "DE-power-load",
        "AT-power-load",
        "AT-heat-load",
        "DE-heat-load",
        "AT-wind_on-profile",
        "DE-wind_on-profile",
        "AT-pv-profile",
        "AT-ror-profile",
        "AT-inflows-reservoir",
        "DE-inflows-reservoir",
        "Coal",
        "Oil",
        "Gas",
        "EUA",
        "price_day_ahead",
    ];
    let start = NaiveDate::from_ymd_opt(2015, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let mut out = header.join(";");
    out.push('\n');
    for hour in 0..8760 {
        let stamp = start + Duration::hours(hour);
        let pv = (hour % 24) as f64 / 23.0;
        let row = format!(
            "{};45,5;{};2;3;0,123456;0,8;{};0,5;4;8;7;30;20,123456;5;31",
            stamp.format("%Y-%m-%d %H:%M:%S"),
            5 + hour % 24,
            pv
        );
        writeln!(out, "{}", row).unwrap();
    }
    fs::write(path, out).unwrap();
}

fn scenario(dir: &Path) -> PathBuf {
    write_timeseries(&dir.join("ts.csv"));
    let path = dir.join("scenario.yaml");
    let yaml = format!(
        "root_dir: {}\ntimeseries: ts.csv\nzones: [AT, DE]\nyear: 2015\n",
        repo_path("test_data/medea").display()
    );
    fs::write(&path, yaml).unwrap();
    path
}

#[test]
fn loads_compiles_and_exports() {
    let dir = tempdir().unwrap();
    let config = load_config_from_path(&scenario(dir.path())).unwrap();
    let tables = load_raw_tables(&config).unwrap();
    assert!(tables.transport_cost.is_some());
    assert_eq!(tables.timeseries.height(), 8760);

    let symbols = compile_symbols(&tables, &config).unwrap();
    let demand = symbols.parameters.get("DEMAND").unwrap();
    assert_eq!(demand.get(&["DE", "h1", "el"]), Some(45.5));
    assert_eq!(demand.get(&["AT", "h2", "el"]), Some(6.0));
    let price = symbols.parameters.get("PRICE").unwrap();
    assert_eq!(price.get(&["AT", "h1", "Gas"]), Some(20.6235));
    let capex = symbols.parameters.get("CAPITALCOST").unwrap();
    assert_eq!(capex.get(&["ng_chp"]), Some(123.4568));
    assert_eq!(symbols.sets.get("t").unwrap().len(), 11);

    let out = dir.path().join("out");
    write_symbols(&symbols, &out).unwrap();
    let hours = fs::read_to_string(out.join("sets/h.csv")).unwrap();
    assert_eq!(hours.lines().count(), 8761);
    let atc = fs::read_to_string(out.join("parameters/CAPACITY_X.csv")).unwrap();
    assert!(atc.lines().any(|l| l == "AT,DE,4.9"));
    assert!(!atc.contains("CH"));
    assert!(out.join("parameters/SWITCH_INVEST.csv").exists());
}

#[test]
fn missing_raw_table_names_the_file() {
    let dir = tempdir().unwrap();
    let mut config = load_config_from_path(&scenario(dir.path())).unwrap();
    config.root_dir = dir.path().to_path_buf();
    let err = load_raw_tables(&config).unwrap_err();
    assert!(format!("{err:#}").contains("capacities.csv"));
}
