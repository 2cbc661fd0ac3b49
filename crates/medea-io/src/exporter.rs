//! Plain CSV export of compiled symbols.
//!
//! Layout under the output directory:
//!
//! ```text
//! sets/<code>.csv          one column `label`
//! parameters/<NAME>.csv    one column per dimension, then `value`
//! ```
//!
//! A dimension repeated within one parameter (`z`, `z`) gets a numbered
//! column name from its second occurrence on (`z`, `z_2`).

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use medea_core::{LabelSet, Parameter, Symbols};
use polars::prelude::*;
use tracing::info;

pub const SETS_DIR: &str = "sets";
pub const PARAMETERS_DIR: &str = "parameters";
pub const VALUE_COLUMN: &str = "value";

/// Write every set and parameter of `symbols` below `out_dir`.
pub fn write_symbols(symbols: &Symbols, out_dir: &Path) -> Result<()> {
    let sets_dir = out_dir.join(SETS_DIR);
    let params_dir = out_dir.join(PARAMETERS_DIR);
    fs::create_dir_all(&sets_dir).with_context(|| format!("creating {}", sets_dir.display()))?;
    fs::create_dir_all(&params_dir)
        .with_context(|| format!("creating {}", params_dir.display()))?;

    for (code, set) in symbols.sets.iter() {
        let mut frame = set_frame(set)?;
        write_csv(&mut frame, &sets_dir.join(format!("{code}.csv")))?;
    }
    for (name, param) in symbols.parameters.iter() {
        let mut frame = parameter_frame(param)
            .with_context(|| format!("building frame for parameter {name}"))?;
        write_csv(&mut frame, &params_dir.join(format!("{name}.csv")))?;
    }

    info!(
        "wrote {} sets and {} parameters to {}",
        symbols.sets.len(),
        symbols.parameters.len(),
        out_dir.display()
    );
    Ok(())
}

pub fn set_frame(set: &LabelSet) -> Result<DataFrame> {
    let labels = Series::new("label", set.labels());
    Ok(DataFrame::new(vec![labels])?)
}

/// Long-form frame of a parameter: key columns then the value column.
pub fn parameter_frame(param: &Parameter) -> Result<DataFrame> {
    let names = dimension_columns(param.dims());
    let mut columns = Vec::with_capacity(names.len() + 1);
    for (level, name) in names.iter().enumerate() {
        let labels: Vec<&str> = param
            .records()
            .iter()
            .map(|r| r.key[level].as_str())
            .collect();
        columns.push(Series::new(name, labels));
    }
    let values: Vec<f64> = param.records().iter().map(|r| r.value).collect();
    columns.push(Series::new(VALUE_COLUMN, values));
    Ok(DataFrame::new(columns)?)
}

/// Column names for a dimension list, numbering repeated dimensions.
pub fn dimension_columns(dims: &[String]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(dims.len());
    for (idx, dim) in dims.iter().enumerate() {
        let seen = dims[..idx].iter().filter(|d| *d == dim).count();
        if seen == 0 {
            names.push(dim.clone());
        } else {
            names.push(format!("{dim}_{}", seen + 1));
        }
    }
    names
}

fn write_csv(frame: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .finish(frame)
        .with_context(|| format!("writing CSV to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use medea_core::{Parameters, Sets};
    use tempfile::tempdir;

    fn symbols() -> Symbols {
        let mut sets = Sets::new();
        sets.insert("z", ["AT", "DE"].into_iter().collect());
        sets.insert("t", ["pv"].into_iter().collect());

        let mut parameters = Parameters::new();
        let mut atc = Parameter::new(&["z", "z"]);
        atc.insert(vec!["AT".into(), "DE".into()], 4.9).unwrap();
        atc.insert(vec!["DE".into(), "AT".into()], 4.9).unwrap();
        parameters.insert("CAPACITY_X", atc);
        parameters.insert("SWITCH_INVEST", Parameter::scalar(1.0).unwrap());
        Symbols { sets, parameters }
    }

    #[test]
    fn repeated_dimensions_are_numbered() {
        let dims = vec!["z".to_string(), "z".to_string(), "t".to_string()];
        assert_eq!(dimension_columns(&dims), vec!["z", "z_2", "t"]);
    }

    #[test]
    fn writes_sets_and_parameters() {
        let dir = tempdir().unwrap();
        write_symbols(&symbols(), dir.path()).unwrap();

        let zones = fs::read_to_string(dir.path().join("sets/z.csv")).unwrap();
        assert_eq!(zones.lines().collect::<Vec<_>>(), vec!["label", "AT", "DE"]);

        let atc = fs::read_to_string(dir.path().join("parameters/CAPACITY_X.csv")).unwrap();
        let lines: Vec<&str> = atc.lines().collect();
        assert_eq!(lines[0], "z,z_2,value");
        assert_eq!(lines[1], "AT,DE,4.9");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn scalar_has_only_a_value_column() {
        let frame = parameter_frame(&Parameter::scalar(0.0).unwrap()).unwrap();
        assert_eq!(frame.get_column_names(), vec![VALUE_COLUMN]);
        assert_eq!(frame.height(), 1);
    }
}
