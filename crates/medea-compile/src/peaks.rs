//! Peak load and peak availability profiles.

use medea_core::{LabelSet, MedeaError, MedeaResult};
use medea_ts::ZonalSeries;

/// Run-of-river has no meaningful profile cap.
pub const EXCLUDED_PROFILE: &str = "ror";

#[derive(Debug, Clone, PartialEq)]
pub struct Peaks {
    /// `(zone, peak electrical load)`
    pub load: Vec<(String, f64)>,
    /// `(zone, technology, peak profile value)`
    pub profile: Vec<(String, String, f64)>,
}

fn max_value(values: &[Option<f64>]) -> Option<f64> {
    values.iter().flatten().copied().reduce(f64::max)
}

pub fn extract_peaks(zonal: &ZonalSeries, zones: &[String]) -> MedeaResult<Peaks> {
    let mut load = Vec::with_capacity(zones.len());
    for zone in zones {
        let series = zonal.require(zone, "el", "load")?;
        let peak = max_value(series).ok_or_else(|| {
            MedeaError::validation(format!("zone {zone}: electrical load series has no values"))
        })?;
        load.push((zone.clone(), peak));
    }

    let technologies: LabelSet = zonal
        .of_type("profile")
        .map(|c| c.key.product.clone())
        .filter(|tech| tech != EXCLUDED_PROFILE)
        .collect();
    let mut profile = Vec::with_capacity(zones.len() * technologies.len());
    for zone in zones {
        for tech in technologies.iter() {
            let peak = zonal
                .get(zone, tech, "profile")
                .and_then(max_value)
                .unwrap_or(0.0);
            profile.push((zone.clone(), tech.to_string(), peak));
        }
    }

    Ok(Peaks { load, profile })
}
