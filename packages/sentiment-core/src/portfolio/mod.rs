//! Portfolio valuation module.
//!
//! Provides per-holding metrics, whole-portfolio summaries with sector
//! aggregation, and the concurrent valuation engine.

mod metrics;
mod summary;
mod valuation;

pub use metrics::{HoldingMetrics, HoldingStatus, HoldingValuation, Trend, UnavailableReason};
pub use summary::{PortfolioSummary, SummaryBuilder, ValuationStatus};
pub use valuation::{PortfolioValuation, QuoteSource, ValuationEngine, DEFAULT_QUOTE_TIMEOUT};
