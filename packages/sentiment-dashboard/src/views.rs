//! Text views over dashboard state
//!
//! Each view turns state into a printable block. Views never fetch or mutate.

pub mod chart;
pub mod compare;
pub mod history;
pub mod news;
pub mod portfolio;
pub mod wishlist;

pub use chart::{ChartRenderer, ChartSlot, TextChart, TextChartRenderer};

/// Placeholder for metrics of a holding that could not be priced
pub const UNAVAILABLE: &str = "N/A";
/// Placeholder for percentages over a zero cost basis
pub const NOT_APPLICABLE: &str = "n/a";

/// Format an amount with two decimals.
pub fn money(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format a percentage, or `n/a` when undefined.
pub fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:+.2}%", v),
        None => NOT_APPLICABLE.to_string(),
    }
}

/// Format a sentiment score the way scores are always shown.
pub fn score(value: f64) -> String {
    format!("{:.4}", value)
}
