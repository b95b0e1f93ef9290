//! Centralized dashboard state
//!
//! Single source of truth for everything the views display. Only the
//! dispatcher mutates it.

use sentiment_core::{paginate, Page, PortfolioValuation, RawHolding};

use crate::api::types::{ComparisonReport, HistoryEntry, NewsAnalysis};

/// Outcome of the last comparison request
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Tickers in the order they were requested
    pub tickers: Vec<String>,
    pub report: ComparisonReport,
}

/// Centralized dashboard state
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    // Sentiment analysis
    pub ticker: Option<String>,
    pub news: Option<NewsAnalysis>,
    pub in_wishlist: bool,

    // History
    pub history: Vec<HistoryEntry>,
    pub history_page: usize,
    pub history_error: Option<String>,

    // Wishlist
    pub wishlist: Vec<String>,
    pub wishlist_error: Option<String>,

    // Portfolio
    pub holdings: Vec<RawHolding>,
    pub valuation: Option<PortfolioValuation>,

    // Comparison
    pub comparison: Option<Comparison>,

    // Messages for the user
    pub error_message: Option<String>,
    pub notice: Option<String>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            history_page: 1,
            ..Default::default()
        }
    }

    /// Current page of the history table.
    pub fn history_page(&self, per_page: usize) -> Page<&HistoryEntry> {
        paginate(&self.history, self.history_page, per_page)
    }

    /// Whether the ticker is already on the wishlist.
    pub fn is_wishlisted(&self, ticker: &str) -> bool {
        self.wishlist.iter().any(|t| t.eq_ignore_ascii_case(ticker))
    }

    /// Forget the results of the last analysis and comparison.
    pub fn clear_results(&mut self) {
        self.ticker = None;
        self.news = None;
        self.in_wishlist = false;
        self.comparison = None;
        self.error_message = None;
        self.notice = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }
}
