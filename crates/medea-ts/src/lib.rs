//! Hourly time series processing.
//!
//! Turns the raw regional time series into the hour-indexed form the compiler
//! works with. The steps run in order and each one is a precondition for the
//! next:
//!
//! 1. parse the `DateTime` column into UTC timestamps
//! 2. keep rows from Jan 1 00:00 to Dec 31 23:00 (UTC) of the model year
//! 3. require exactly `hours_in_year(year)` rows
//! 4. require strictly ascending timestamps, then re-key rows to `h1..hN` by position
//! 5. split columns of the configured zones into (zone, product, series type)
//! 6. apply the demand correction to its load column in the flat column view;
//!    the zonal series from step 5 keep the uncorrected values

pub mod zonal;

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use medea_core::{hour_labels, LabelSet, MedeaError, MedeaResult};
use medea_scenarios::{DemandCorrection, ScenarioConfig};
use polars::prelude::*;
use tracing::{debug, info};

pub use zonal::{product_code, split_zonal_name, ZonalColumn, ZonalKey, ZonalSeries};

pub const DATETIME_COLUMN: &str = "DateTime";

/// Time series restricted to the model year and re-keyed to hour labels.
#[derive(Debug, Clone)]
pub struct HourlySeries {
    hours: LabelSet,
    columns: Vec<(String, Vec<Option<f64>>)>,
    positions: HashMap<String, usize>,
    zonal: ZonalSeries,
}

impl HourlySeries {
    /// Hour labels in row order; every column has exactly this many values.
    pub fn hours(&self) -> &LabelSet {
        &self.hours
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// A column by its source name (`Coal`, `EUA`, `DE-power-load`, ...).
    pub fn column(&self, name: &str) -> MedeaResult<&[Option<f64>]> {
        self.positions
            .get(name)
            .map(|&pos| self.columns[pos].1.as_slice())
            .ok_or_else(|| MedeaError::lookup(format!("time series has no column '{name}'")))
    }

    pub fn zonal(&self) -> &ZonalSeries {
        &self.zonal
    }
}

pub fn process_timeseries(frame: &DataFrame, config: &ScenarioConfig) -> MedeaResult<HourlySeries> {
    let hours = hour_labels(config.year);
    let stamps = parse_timestamps(frame)?;
    let (start, end) = year_bounds(config.year)?;

    let in_year: Vec<bool> = stamps.iter().map(|ts| *ts >= start && *ts <= end).collect();
    let mask = Series::new("in_year", in_year);
    let selected = frame.filter(mask.bool()?)?;
    let kept: Vec<DateTime<Utc>> = stamps
        .into_iter()
        .filter(|ts| *ts >= start && *ts <= end)
        .collect();
    info!(
        "time series: kept {} of {} rows for {}",
        selected.height(),
        frame.height(),
        config.year
    );

    check_resolution(selected.height(), hours.len())?;
    check_ascending(&kept)?;

    let mut zonal = Vec::new();
    for series in selected.get_columns() {
        let name = series.name();
        if name == DATETIME_COLUMN {
            continue;
        }
        if let Some(key) = split_zonal_name(name, &config.zones)? {
            zonal.push(ZonalColumn {
                key,
                values: numeric_values(series)?,
            });
        }
    }

    // zonal columns above keep the uncorrected load
    let corrected = apply_demand_correction(selected, &config.constants.demand_correction)?;

    let mut columns = Vec::with_capacity(corrected.width());
    let mut positions = HashMap::new();
    for series in corrected.get_columns() {
        let name = series.name();
        if name == DATETIME_COLUMN {
            continue;
        }
        positions.insert(name.to_string(), columns.len());
        columns.push((name.to_string(), numeric_values(series)?));
    }
    debug!(
        "time series: {} columns, {} zonal",
        columns.len(),
        zonal.len()
    );

    Ok(HourlySeries {
        hours,
        columns,
        positions,
        zonal: ZonalSeries::new(zonal),
    })
}

/// Inclusive bounds of the model year: Jan 1 00:00 and Dec 31 23:00 UTC.
pub fn year_bounds(year: i32) -> MedeaResult<(DateTime<Utc>, DateTime<Utc>)> {
    let start = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single();
    let end = Utc.with_ymd_and_hms(year, 12, 31, 23, 0, 0).single();
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(MedeaError::Config(format!("model year {year} is not representable"))),
    }
}

/// The single explicit resolution check: filtered rows must match the hour index.
pub fn check_resolution(rows: usize, hours: usize) -> MedeaResult<()> {
    if rows != hours {
        return Err(MedeaError::Config(format!(
            "Mismatch of time series data and model time resolution: {rows} rows for {hours} hours. Is the configured year wrong?"
        )));
    }
    Ok(())
}

/// Positional re-keying is only sound on strictly ascending timestamps.
pub fn check_ascending(stamps: &[DateTime<Utc>]) -> MedeaResult<()> {
    if let Some(pair) = stamps.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(MedeaError::validation(format!(
            "time series is not strictly ascending: {} is followed by {}",
            pair[0], pair[1]
        )));
    }
    Ok(())
}

pub fn apply_demand_correction(
    mut frame: DataFrame,
    correction: &DemandCorrection,
) -> MedeaResult<DataFrame> {
    let series = frame.column(&correction.column).map_err(|_| {
        MedeaError::lookup(format!(
            "time series has no column '{}' for the demand correction",
            correction.column
        ))
    })?;
    let corrected: Vec<Option<f64>> = numeric_values(series)?
        .into_iter()
        .map(|v| v.map(|x| x / correction.factor))
        .collect();
    frame.with_column(Series::new(&correction.column, corrected))?;
    Ok(frame)
}

pub fn parse_timestamps(frame: &DataFrame) -> MedeaResult<Vec<DateTime<Utc>>> {
    let column = frame.column(DATETIME_COLUMN).map_err(|_| {
        MedeaError::lookup(format!("time series has no '{DATETIME_COLUMN}' column"))
    })?;
    let text = column.cast(&DataType::Utf8)?;
    text.utf8()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            let value = value.ok_or_else(|| {
                MedeaError::Parse(format!("row {row}: empty {DATETIME_COLUMN}"))
            })?;
            parse_timestamp(value).ok_or_else(|| {
                MedeaError::Parse(format!("row {row}: cannot parse timestamp '{value}'"))
            })
        })
        .collect()
}

/// Parse an offset-aware timestamp, or a naive one read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%z"] {
        if let Ok(ts) = DateTime::parse_from_str(value, format) {
            return Some(ts.with_timezone(&Utc));
        }
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

fn numeric_values(series: &Series) -> MedeaResult<Vec<Option<f64>>> {
    let cast = series.cast(&DataType::Float64)?;
    Ok(cast
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}
