pub mod compile;
pub mod hours;
