//! Technology catalog, capacity, operating-region and transmission inputs.
//!
//! Typed views over the raw tables plus the two technology-level derivations:
//! co-generation fuel need and zone-restricted transmission links.

use std::collections::HashMap;

use medea_core::{MedeaError, MedeaResult, RawTable};

/// Catalog rows that carry a technology name. Fully blank rows are dropped.
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    table: &'a RawTable,
    names: Vec<String>,
    rows: Vec<usize>,
}

impl<'a> Catalog<'a> {
    pub fn new(table: &'a RawTable) -> MedeaResult<Self> {
        let mut names = Vec::new();
        let mut rows = Vec::new();
        for (row, name) in table.key(0)?.into_iter().enumerate() {
            if let Some(name) = name.filter(|n| !n.is_empty()) {
                names.push(name);
                rows.push(row);
            }
        }
        Ok(Self { table, names, rows })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// `(technology, value)` pairs of a numeric column.
    pub fn numeric(&self, column: &str) -> MedeaResult<Vec<(&str, Option<f64>)>> {
        let values = self.table.numeric(column)?;
        Ok(self.pair(values))
    }

    pub fn text(&self, column: &str) -> MedeaResult<Vec<(&str, Option<String>)>> {
        let values = self.table.text(column)?;
        Ok(self.pair(values))
    }

    /// Technologies whose `flag` column equals 1.
    pub fn flagged(&self, flag: &str) -> MedeaResult<Vec<String>> {
        Ok(self
            .numeric(flag)?
            .into_iter()
            .filter(|(_, v)| *v == Some(1.0))
            .map(|(name, _)| name.to_string())
            .collect())
    }

    /// Storage plants fuelled by water.
    pub fn hydro_storage(&self) -> MedeaResult<Vec<String>> {
        let storage = self.numeric("storage")?;
        let fuel = self.text("fuel")?;
        Ok(storage
            .into_iter()
            .zip(fuel)
            .filter(|((_, flag), (_, fuel))| *flag == Some(1.0) && fuel.as_deref() == Some("Water"))
            .map(|((name, _), _)| name.to_string())
            .collect())
    }

    fn pair<T: Clone>(&self, values: Vec<T>) -> Vec<(&str, T)> {
        self.names
            .iter()
            .zip(&self.rows)
            .map(|(name, &row)| (name.as_str(), values[row].clone()))
            .collect()
    }
}

pub const INSTALLED_CAPACITY_OUT: &str = "Installed Capacity Out";
pub const INSTALLED_CAPACITY_IN: &str = "Installed Capacity In";
pub const STORAGE_CAPACITY: &str = "Storage Capacity";

/// Capacity table keyed by (kind, zone, year) with one column per technology.
#[derive(Debug, Clone)]
pub struct CapacityTable {
    kinds: Vec<Option<String>>,
    zones: Vec<Option<String>>,
    years: Vec<Option<f64>>,
    technologies: Vec<String>,
    columns: HashMap<String, Vec<Option<f64>>>,
}

impl CapacityTable {
    pub fn new(table: &RawTable) -> MedeaResult<Self> {
        let technologies = table.value_columns();
        let mut columns = HashMap::with_capacity(technologies.len());
        for tech in &technologies {
            columns.insert(tech.clone(), table.numeric(tech)?);
        }
        Ok(Self {
            kinds: table.key(0)?,
            zones: table.key(1)?,
            years: table.numeric_key(2)?,
            technologies,
            columns,
        })
    }

    pub fn technologies(&self) -> &[String] {
        &self.technologies
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn row_key(&self, row: usize) -> (Option<&str>, Option<&str>, Option<f64>) {
        (
            self.kinds[row].as_deref(),
            self.zones[row].as_deref(),
            self.years[row],
        )
    }

    pub fn find_row(&self, kind: &str, zone: &str, year: i32) -> Option<usize> {
        (0..self.len()).find(|&row| {
            self.kinds[row].as_deref() == Some(kind)
                && self.zones[row].as_deref() == Some(zone)
                && self.years[row] == Some(f64::from(year))
        })
    }

    pub fn require_row(&self, kind: &str, zone: &str, year: i32) -> MedeaResult<usize> {
        self.find_row(kind, zone, year).ok_or_else(|| {
            MedeaError::lookup(format!(
                "capacities: no row for ('{kind}', '{zone}', {year})"
            ))
        })
    }

    pub fn value(&self, row: usize, tech: &str) -> MedeaResult<Option<f64>> {
        self.columns
            .get(tech)
            .map(|values| values[row])
            .ok_or_else(|| MedeaError::lookup(format!("capacities: missing column '{tech}'")))
    }
}

/// One row of the operating-region table.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingRegionRow {
    pub technology: String,
    pub carrier: String,
    pub region: String,
    pub fuel: Option<f64>,
    pub el: Option<f64>,
    pub ht: Option<f64>,
}

pub fn operating_regions(table: &RawTable) -> MedeaResult<Vec<OperatingRegionRow>> {
    let technologies = table.key(0)?;
    let carriers = table.key(1)?;
    let regions = table.key(2)?;
    let fuel = table.numeric("fuel")?;
    let el = table.numeric("el")?;
    let ht = table.numeric("ht")?;

    let mut rows = Vec::with_capacity(table.height());
    for row in 0..table.height() {
        let (Some(technology), Some(carrier), Some(region)) = (
            technologies[row].clone(),
            carriers[row].clone(),
            regions[row].clone(),
        ) else {
            return Err(MedeaError::lookup(format!(
                "{}: row {row} has an incomplete key",
                table.name()
            )));
        };
        rows.push(OperatingRegionRow {
            technology,
            carrier,
            region,
            fuel: fuel[row],
            el: el[row],
            ht: ht[row],
        });
    }
    Ok(rows)
}

/// Fuel need of every operating-region row with a fuel input: `fuel / eta_ec`,
/// with the efficiency taken from the catalog's heat-generating technologies.
pub fn fuel_need(
    catalog: &Catalog<'_>,
    regions: &[OperatingRegionRow],
) -> MedeaResult<Vec<(OperatingRegionRow, f64)>> {
    let heat_generation = catalog.numeric("heat_generation")?;
    let eta = catalog.numeric("eta_ec")?;
    let efficiency: HashMap<&str, Option<f64>> = heat_generation
        .into_iter()
        .zip(eta)
        .filter(|((_, flag), _)| *flag == Some(1.0))
        .map(|((name, _), (_, eta))| (name, eta))
        .collect();

    let mut out = Vec::with_capacity(regions.len());
    for row in regions {
        let eta = efficiency
            .get(row.technology.as_str())
            .copied()
            .flatten()
            .filter(|eta| *eta != 0.0)
            .ok_or_else(|| {
                MedeaError::lookup(format!(
                    "no heat-generation efficiency (eta_ec) for co-generation technology '{}'",
                    row.technology
                ))
            })?;
        if let Some(fuel) = row.fuel {
            out.push((row.clone(), fuel / eta));
        }
    }
    Ok(out)
}

/// Interconnector between two configured zones.
#[derive(Debug, Clone, PartialEq)]
pub struct TransmissionLink {
    pub from: String,
    pub to: String,
    /// Transfer capacity in model units.
    pub capacity: Option<f64>,
    pub distance: Option<f64>,
}

/// Links whose both ends are configured zones, with capacity divided by
/// `unit_divisor`.
pub fn transmission_links(
    table: &RawTable,
    zones: &[String],
    unit_divisor: f64,
) -> MedeaResult<Vec<TransmissionLink>> {
    let from = table.key(0)?;
    let to = table.key(1)?;
    let atc = table.numeric("ATC")?;
    let distance = table.numeric("distance")?;
    let member = |zone: &Option<String>| {
        zone.as_deref()
            .map_or(false, |z| zones.iter().any(|configured| configured == z))
    };

    Ok((0..table.height())
        .filter(|&row| member(&from[row]) && member(&to[row]))
        .map(|row| TransmissionLink {
            from: from[row].clone().unwrap_or_default(),
            to: to[row].clone().unwrap_or_default(),
            capacity: atc[row].map(|c| c / unit_divisor),
            distance: distance[row],
        })
        .collect())
}
