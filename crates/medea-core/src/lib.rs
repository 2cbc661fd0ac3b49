//! # medea-core: shared types for the medea symbol compiler
//!
//! The compiler turns raw relational tables into the two structures consumed by
//! the medea power system model:
//!
//! - **Sets**: label categories such as technologies (`t`), zones (`z`) and hours (`h`)
//! - **Parameters**: multi-dimensional numeric series in long relational form
//!
//! This crate holds what every stage shares: the error type, the calendar
//! arithmetic that sizes the hour index, the [`LabelSet`]/[`Parameter`] value
//! types, and [`RawTable`] column access over polars frames.
//!
//! ```
//! use medea_core::{hours_in_year, Parameter};
//!
//! assert_eq!(hours_in_year(2016), 8784);
//!
//! let mut peak = Parameter::new(&["z"]);
//! peak.insert(vec!["AT".into()], 11.2).unwrap();
//! assert_eq!(peak.get(&["AT"]), Some(11.2));
//! ```

pub mod calendar;
pub mod error;
pub mod symbols;
pub mod table;

pub use calendar::{hour_label, hour_labels, hours_in_year};
pub use error::{MedeaError, MedeaResult};
pub use symbols::{round_decimals, LabelSet, Parameter, Parameters, Record, Sets, Symbols};
pub use table::{numeric_label, RawTable, RawTables};
