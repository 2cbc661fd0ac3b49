use anyhow::{bail, Result};
use medea_core::hours_in_year;

pub fn handle(year: i32) -> Result<()> {
    if !(1..=9999).contains(&year) {
        bail!("year {year} is outside 1..=9999");
    }
    println!("{}", hours_in_year(year));
    Ok(())
}
