//! Stats module - descriptive statistics, ranks and text reports

mod calculator;
pub mod report;

pub use calculator::{StatsCalculator, LAG_THRESHOLD};
