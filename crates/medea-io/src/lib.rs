//! # medea-io: raw table loading and symbol export
//!
//! - [`load_raw_tables`] reads the `data/raw` CSV layout and the hourly time
//!   series named by a [`medea_scenarios::ScenarioConfig`]
//! - [`write_symbols`] writes compiled sets and parameters as plain CSV
//!
//! Both are thin adapters around `medea-compile`, which never touches disk.
//!
//! ```rust,no_run
//! use medea_io::{load_raw_tables, write_symbols};
//! use medea_scenarios::load_config_from_path;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = load_config_from_path(Path::new("scenario.yaml"))?;
//!     let tables = load_raw_tables(&config)?;
//!     let symbols = medea_compile::compile_symbols(&tables, &config)?;
//!     write_symbols(&symbols, Path::new("out"))?;
//!     Ok(())
//! }
//! ```

pub mod exporter;
pub mod loader;

pub use exporter::{dimension_columns, parameter_frame, set_frame, write_symbols};
pub use loader::{load_raw_tables, parse_decimal_comma, read_table, read_timeseries};
