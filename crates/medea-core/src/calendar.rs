//! Calendar arithmetic for the hourly model horizon.

use chrono::{Datelike, NaiveDate};

use crate::symbols::LabelSet;

/// Number of hours in the given calendar year (8760, or 8784 in leap years).
pub fn hours_in_year(year: i32) -> usize {
    let days = NaiveDate::from_ymd_opt(year, 12, 31)
        .map(|last| last.ordinal() as usize)
        .unwrap_or(365);
    days * 24
}

/// Hour label `h{n}` for a 1-based position.
pub fn hour_label(position: usize) -> String {
    format!("h{position}")
}

/// The hour index category `h1 .. hN` for a model year.
pub fn hour_labels(year: i32) -> LabelSet {
    LabelSet::from_unique((1..=hours_in_year(year)).map(hour_label).collect())
}
