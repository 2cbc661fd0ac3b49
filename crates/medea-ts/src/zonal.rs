//! Zone/product/series-type view of the hourly time series.
//!
//! Zonal columns are named `<zone>-<product>-<series type>`, e.g.
//! `AT-power-load` or `DE-wind_on-profile`. Each one becomes a
//! [`ZonalColumn`] keyed by the split triple, with raw product codes mapped to
//! the model's carrier names.

use medea_core::{MedeaError, MedeaResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZonalKey {
    pub zone: String,
    pub product: String,
    pub series_type: String,
}

#[derive(Debug, Clone)]
pub struct ZonalColumn {
    pub key: ZonalKey,
    pub values: Vec<Option<f64>>,
}

/// All zonal columns of a processed time series, in source column order.
#[derive(Debug, Clone, Default)]
pub struct ZonalSeries {
    columns: Vec<ZonalColumn>,
}

impl ZonalSeries {
    pub fn new(columns: Vec<ZonalColumn>) -> Self {
        Self { columns }
    }

    pub fn get(&self, zone: &str, product: &str, series_type: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| {
                c.key.zone == zone && c.key.product == product && c.key.series_type == series_type
            })
            .map(|c| c.values.as_slice())
    }

    /// Like [`ZonalSeries::get`] but absent series are lookup errors.
    pub fn require(
        &self,
        zone: &str,
        product: &str,
        series_type: &str,
    ) -> MedeaResult<&[Option<f64>]> {
        self.get(zone, product, series_type).ok_or_else(|| {
            MedeaError::lookup(format!(
                "time series has no column for {zone}-{product}-{series_type}"
            ))
        })
    }

    /// Columns with the given series type (`load`, `profile`, ...).
    pub fn of_type<'a>(&'a self, series_type: &'a str) -> impl Iterator<Item = &'a ZonalColumn> {
        self.columns
            .iter()
            .filter(move |c| c.key.series_type == series_type)
    }

    pub fn columns(&self) -> &[ZonalColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Map raw product codes to model carrier names.
pub fn product_code(raw: &str) -> &str {
    match raw {
        "power" => "el",
        "heat" => "ht",
        other => other,
    }
}

/// Split a column name into its zonal key if its zone part is exactly one of
/// `zones`. Columns of other zones, and flat columns such as `Coal`, yield
/// `None`; a configured-zone column that is not a `zone-product-type` triple is
/// a parse error.
pub fn split_zonal_name(name: &str, zones: &[String]) -> MedeaResult<Option<ZonalKey>> {
    let parts: Vec<&str> = name.split('-').collect();
    if !zones.iter().any(|z| z == parts[0]) {
        return Ok(None);
    }
    match parts.as_slice() {
        [zone, product, series_type] => Ok(Some(ZonalKey {
            zone: zone.to_string(),
            product: product_code(product).to_string(),
            series_type: series_type.to_string(),
        })),
        _ => Err(MedeaError::Parse(format!(
            "zonal column '{name}' is not of the form <zone>-<product>-<series type>"
        ))),
    }
}
