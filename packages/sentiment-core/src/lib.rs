//! Sentiment Core - Portfolio valuation and dashboard domain library.
//!
//! This crate provides the pure domain logic behind the sentiment dashboard:
//!
//! - **Portfolio valuation**: concurrent quote retrieval, per-holding metrics,
//!   portfolio totals and sector aggregation
//! - **Sector chart**: pie slices with an explicit palette overflow policy
//! - **Sentiment**: score bucketing for display
//! - **Pagination**: page slicing for history tables
//!
//! # Example
//!
//! ```rust,no_run
//! use sentiment_core::{Holding, Quote, QuoteSource, ValuationEngine};
//!
//! struct FixedPrice(f64);
//!
//! #[async_trait::async_trait]
//! impl QuoteSource for FixedPrice {
//!     async fn quote(&self, ticker: &str) -> sentiment_core::Result<Quote> {
//!         Ok(Quote::new(ticker, self.0))
//!     }
//! }
//!
//! # async fn run() {
//! let holdings = vec![Holding::new("AAPL", "Tech", 10.0, 100.0)];
//! let valuation = ValuationEngine::new()
//!     .valuate_holdings(&FixedPrice(150.0), &holdings)
//!     .await;
//! println!("Total value: {}", valuation.summary.total_value);
//! # }
//! ```

pub mod chart;
pub mod pagination;
pub mod portfolio;
pub mod sentiment;
pub mod types;

// Re-export commonly used types
pub use types::{ApiResponse, Holding, Quote, RawHolding, RawNumber};

// Re-export main functionality
pub use chart::{OverflowPolicy, Palette, PieSlice, SectorChart};
pub use pagination::{paginate, Page};
pub use portfolio::{
    HoldingMetrics, HoldingStatus, HoldingValuation, PortfolioSummary, PortfolioValuation,
    QuoteSource, Trend, UnavailableReason, ValuationEngine, ValuationStatus,
};
pub use sentiment::{average_score, Sentiment};

/// Error types for sentiment-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid holding: {0}")]
    InvalidHolding(String),

    #[error("Quote for {ticker} failed: {message}")]
    Quote { ticker: String, message: String },

    #[error("Quote for {ticker} timed out")]
    Timeout { ticker: String },
}

impl Error {
    /// Build a quote failure for the given ticker.
    pub fn quote(ticker: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Quote {
            ticker: ticker.into(),
            message: message.into(),
        }
    }
}

/// Result type for sentiment-core operations.
pub type Result<T> = std::result::Result<T, Error>;
