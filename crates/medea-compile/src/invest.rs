//! Investment limits gated by the scenario's investment switches.
//!
//! Switches are global: a matrix holds the same bound in every cell.
//! Transmission is bounded by a unit expansion increment, so its enabled value
//! is 1 rather than unbounded.

use medea_core::{LabelSet, MedeaResult, Sets};
use medea_scenarios::InvestmentSwitches;

#[derive(Debug, Clone, PartialEq)]
pub struct LimitMatrix {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub value: f64,
}

impl LimitMatrix {
    fn filled(rows: &LabelSet, columns: &LabelSet, value: f64) -> Self {
        Self {
            rows: rows.labels().to_vec(),
            columns: columns.labels().to_vec(),
            value,
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.rows.iter().flat_map(move |row| {
            self.columns
                .iter()
                .map(move |col| (row.as_str(), col.as_str(), self.value))
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentLimits {
    pub thermal: f64,
    /// zone × intermittent technology
    pub intermittent: LimitMatrix,
    /// zone × storage technology
    pub storage: LimitMatrix,
    /// zone × zone
    pub transmission: LimitMatrix,
}

fn unbounded_if(enabled: bool) -> f64 {
    if enabled {
        f64::INFINITY
    } else {
        0.0
    }
}

pub fn build_investment_limits(
    switches: &InvestmentSwitches,
    sets: &Sets,
) -> MedeaResult<InvestmentLimits> {
    let zones = sets.get("z")?;
    Ok(InvestmentLimits {
        thermal: unbounded_if(switches.conventionals),
        intermittent: LimitMatrix::filled(zones, sets.get("r")?, unbounded_if(switches.renewables)),
        storage: LimitMatrix::filled(zones, sets.get("s")?, unbounded_if(switches.storage)),
        transmission: LimitMatrix::filled(
            zones,
            zones,
            if switches.transmission { 1.0 } else { 0.0 },
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets() -> Sets {
        let mut sets = Sets::new();
        sets.insert("z", ["AT", "DE"].into_iter().collect());
        sets.insert("r", ["wind_on", "pv"].into_iter().collect());
        sets.insert("s", ["hydro_res"].into_iter().collect());
        sets
    }

    #[test]
    fn enabled_switches_are_unbounded() {
        let limits = build_investment_limits(&InvestmentSwitches::default(), &sets()).unwrap();
        assert_eq!(limits.thermal, f64::INFINITY);
        assert!(limits.intermittent.cells().all(|(_, _, v)| v == f64::INFINITY));
        assert!(limits.storage.cells().all(|(_, _, v)| v == f64::INFINITY));
        assert!(limits.transmission.cells().all(|(_, _, v)| v == 1.0));
        assert_eq!(limits.intermittent.cells().count(), 4);
        assert_eq!(limits.transmission.cells().count(), 4);
    }

    #[test]
    fn disabled_switches_are_zero() {
        let switches = InvestmentSwitches {
            conventionals: false,
            renewables: false,
            storage: false,
            transmission: false,
        };
        let limits = build_investment_limits(&switches, &sets()).unwrap();
        assert_eq!(limits.thermal, 0.0);
        assert!(limits.intermittent.cells().all(|(_, _, v)| v == 0.0));
        assert!(limits.storage.cells().all(|(_, _, v)| v == 0.0));
        assert!(limits.transmission.cells().all(|(_, _, v)| v == 0.0));
    }

    #[test]
    fn switches_are_independent() {
        let switches = InvestmentSwitches {
            storage: false,
            ..InvestmentSwitches::default()
        };
        let limits = build_investment_limits(&switches, &sets()).unwrap();
        assert_eq!(limits.storage.value, 0.0);
        assert_eq!(limits.intermittent.value, f64::INFINITY);
        assert_eq!(limits.thermal, f64::INFINITY);
    }
}
