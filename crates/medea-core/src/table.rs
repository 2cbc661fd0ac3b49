//! Relational input tables.
//!
//! A [`RawTable`] is a polars frame whose first `key_columns` columns identify
//! rows (the equivalent of a multi-level row index) and whose remaining columns
//! are named attributes. Accessors return owned column vectors and map absent
//! columns to [`MedeaError::Lookup`] so callers can propagate with `?`.

use polars::prelude::*;

use crate::error::{MedeaError, MedeaResult};

#[derive(Debug, Clone)]
pub struct RawTable {
    name: String,
    frame: DataFrame,
    key_columns: usize,
}

impl RawTable {
    pub fn new(name: impl Into<String>, frame: DataFrame, key_columns: usize) -> MedeaResult<Self> {
        let name = name.into();
        if frame.width() < key_columns {
            return Err(MedeaError::validation(format!(
                "{name}: expected at least {key_columns} key columns, found {} columns",
                frame.width()
            )));
        }
        Ok(Self {
            name,
            frame,
            key_columns,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.frame.column(column).is_ok()
    }

    /// Names of the non-key columns, in table order.
    pub fn value_columns(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .skip(self.key_columns)
            .map(str::to_string)
            .collect()
    }

    /// Labels of key level `level` as strings.
    pub fn key(&self, level: usize) -> MedeaResult<Vec<Option<String>>> {
        let series = self.key_series(level)?;
        text_values(series)
    }

    /// Key level `level` read as numbers (e.g. a year level).
    pub fn numeric_key(&self, level: usize) -> MedeaResult<Vec<Option<f64>>> {
        let series = self.key_series(level)?;
        numeric_values(series)
    }

    pub fn text(&self, column: &str) -> MedeaResult<Vec<Option<String>>> {
        text_values(self.column(column)?)
    }

    /// Numeric attribute column; NaN cells are reported as `None`.
    pub fn numeric(&self, column: &str) -> MedeaResult<Vec<Option<f64>>> {
        numeric_values(self.column(column)?)
    }

    fn column(&self, column: &str) -> MedeaResult<&Series> {
        self.frame
            .column(column)
            .map_err(|_| MedeaError::lookup(format!("{}: missing column '{column}'", self.name)))
    }

    fn key_series(&self, level: usize) -> MedeaResult<&Series> {
        if level >= self.key_columns {
            return Err(MedeaError::lookup(format!(
                "{}: key level {level} out of range ({} key columns)",
                self.name, self.key_columns
            )));
        }
        Ok(&self.frame.get_columns()[level])
    }
}

fn text_values(series: &Series) -> MedeaResult<Vec<Option<String>>> {
    let cast = series.cast(&DataType::Utf8)?;
    Ok(cast
        .utf8()?
        .into_iter()
        .map(|v| v.map(|s| s.trim().to_string()))
        .collect())
}

fn numeric_values(series: &Series) -> MedeaResult<Vec<Option<f64>>> {
    let cast = series.cast(&DataType::Float64)?;
    Ok(cast
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Format a numeric key label the way it reads in the source table
/// (`2016` rather than `2016.0`).
pub fn numeric_label(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// The raw inputs of one compilation call.
#[derive(Debug, Clone)]
pub struct RawTables {
    /// Keyed by (capacity kind, zone, year); one column per technology.
    pub capacity: RawTable,
    /// Keyed by (zone from, zone to); columns `ATC` and `distance`.
    pub transmission: RawTable,
    /// Keyed by technology.
    pub technology: RawTable,
    /// Keyed by (cogeneration technology, carrier, region id).
    pub operating_region: RawTable,
    /// Keyed by technology.
    pub external_cost: RawTable,
    /// Keyed by fuel; one column per zone. Absent when no transport costs apply.
    pub transport_cost: Option<RawTable>,
    /// Hourly series with a `DateTime` column.
    pub timeseries: DataFrame,
}
