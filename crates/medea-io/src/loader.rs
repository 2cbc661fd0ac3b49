//! Raw input loading from the `data/raw` directory layout.
//!
//! Relational tables are plain comma-separated files read with polars. The
//! hourly time series is exported from spreadsheets with `;` as separator and
//! `,` as decimal mark, which polars' CSV reader does not handle, so it is
//! parsed with the `csv` crate and assembled into a frame column by column.

use std::fs::File;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use medea_core::{RawTable, RawTables};
use medea_scenarios::ScenarioConfig;
use medea_ts::DATETIME_COLUMN;
use polars::prelude::*;
use tracing::{debug, info};

pub const CAPACITIES_FILE: &str = "capacities.csv";
pub const TRANSMISSION_FILE: &str = "transmission.csv";
pub const TECHNOLOGIES_FILE: &str = "technologies.csv";
pub const OPERATING_REGION_FILE: &str = "operating_region.csv";
pub const EXTERNAL_COST_FILE: &str = "external_cost.csv";
pub const TRANSPORT_COST_FILE: &str = "cost_transport.csv";

/// Load every input table named by the scenario.
pub fn load_raw_tables(config: &ScenarioConfig) -> Result<RawTables> {
    let raw = config.raw_data_dir();
    info!("loading raw tables from {}", raw.display());

    let transport_path = raw.join(TRANSPORT_COST_FILE);
    let transport_cost = if transport_path.exists() {
        Some(read_table(&transport_path, "cost_transport", 1)?)
    } else {
        debug!("no {} found, prices carry no transport cost", TRANSPORT_COST_FILE);
        None
    };

    Ok(RawTables {
        capacity: read_table(&raw.join(CAPACITIES_FILE), "capacities", 3)?,
        transmission: read_table(&raw.join(TRANSMISSION_FILE), "transmission", 2)?,
        technology: read_table(&raw.join(TECHNOLOGIES_FILE), "technologies", 1)?,
        operating_region: read_table(&raw.join(OPERATING_REGION_FILE), "operating_region", 3)?,
        external_cost: read_table(&raw.join(EXTERNAL_COST_FILE), "external_cost", 1)?,
        transport_cost,
        timeseries: read_timeseries(&config.timeseries)?,
    })
}

/// Read a comma-separated table whose first `key_columns` columns form its key.
pub fn read_table(path: &Path, name: &str, key_columns: usize) -> Result<RawTable> {
    let mut file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let frame = CsvReader::new(&mut file)
        .has_header(true)
        .finish()
        .with_context(|| format!("reading CSV table {}", path.display()))?;
    debug!("{name}: {} rows x {} columns", frame.height(), frame.width());
    RawTable::new(name, frame, key_columns).with_context(|| format!("loading {name}"))
}

/// Read the `;`-separated, decimal-comma hourly time series.
///
/// The `DateTime` column is kept as text; every other column must hold
/// numbers. Empty cells become nulls.
pub fn read_timeseries(path: &Path) -> Result<DataFrame> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening time series {}", path.display()))?;
    let headers: Vec<String> = rdr
        .headers()
        .context("reading time series header")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let stamp_idx = headers
        .iter()
        .position(|h| h == DATETIME_COLUMN)
        .ok_or_else(|| anyhow!("time series {} has no '{DATETIME_COLUMN}' column", path.display()))?;

    let mut stamps = Vec::new();
    let mut values: Vec<Vec<Option<f64>>> = vec![Vec::new(); headers.len()];
    for (line, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("parsing time series record {}", line + 1))?;
        for (idx, cell) in record.iter().enumerate().take(headers.len()) {
            if idx == stamp_idx {
                stamps.push(cell.trim().to_string());
            } else {
                let value = parse_decimal_comma(cell).with_context(|| {
                    format!("time series row {}, column '{}'", line + 1, headers[idx])
                })?;
                values[idx].push(value);
            }
        }
    }

    let mut columns = Vec::with_capacity(headers.len());
    for (idx, (name, column)) in headers.iter().zip(values).enumerate() {
        if idx == stamp_idx {
            columns.push(Series::new(name, std::mem::take(&mut stamps)));
        } else {
            columns.push(Series::new(name, column));
        }
    }
    let frame = DataFrame::new(columns).context("assembling time series frame")?;
    info!(
        "time series: {} rows x {} columns from {}",
        frame.height(),
        frame.width(),
        path.display()
    );
    Ok(frame)
}

/// Parse a number written with `,` as decimal mark. Blank cells are `None`.
pub fn parse_decimal_comma(cell: &str) -> Result<Option<f64>> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }
    let normalized = cell.replace(',', ".");
    normalized
        .parse::<f64>()
        .map(Some)
        .map_err(|_| anyhow!("'{cell}' is not a number"))
}
