//! API types for the dashboard backend

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sentiment_core::{RawHolding, Sentiment};

// ============================================================================
// Error Envelope
// ============================================================================

/// Body returned alongside every non-2xx status
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: Option<String>,
}

/// Body of simple acknowledgement responses
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

// ============================================================================
// News Types
// ============================================================================

/// A scored news headline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    pub headline: String,
    #[serde(default)]
    pub summary: String,
    pub sentiment_score: f64,
}

impl NewsItem {
    pub fn sentiment(&self) -> Sentiment {
        Sentiment::from_score(self.sentiment_score)
    }
}

/// Result of `/api/news`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsAnalysis {
    #[serde(default)]
    pub news: Vec<NewsItem>,
    #[serde(default)]
    pub overall_score: f64,
}

impl NewsAnalysis {
    pub fn sentiment(&self) -> Sentiment {
        Sentiment::from_score(self.overall_score)
    }
}

// ============================================================================
// History Types
// ============================================================================

/// A previous analysis stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub ticker: String,
    pub score: f64,
    pub timestamp: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

// ============================================================================
// Wishlist Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WishlistResponse {
    #[serde(default)]
    pub wishlist: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TickerRequest<'a> {
    pub ticker: &'a str,
}

/// Result of adding a ticker to the wishlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WishlistAdd {
    Added,
    AlreadyPresent,
}

// ============================================================================
// Portfolio Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PortfolioResponse {
    #[serde(default)]
    pub portfolio: Vec<RawHolding>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct QuoteResponse {
    pub current_price: f64,
}

// ============================================================================
// Comparison Types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CompareRequest<'a> {
    pub tickers: &'a [String],
}

/// A metric cell: numeric or textual
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{:.2}", n),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

/// Best and worst ticker for one metric
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ranking {
    pub best: String,
    pub worst: String,
}

/// Result of `/api/compare`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ComparisonReport {
    #[serde(default)]
    pub metrics: Vec<String>,
    /// ticker -> metric -> value (null when the backend has no value)
    #[serde(default)]
    pub data: HashMap<String, HashMap<String, Option<MetricValue>>>,
    #[serde(default)]
    pub ranking: HashMap<String, Ranking>,
}

impl ComparisonReport {
    /// Value of `metric` for `ticker`, if present and non-null.
    pub fn value(&self, ticker: &str, metric: &str) -> Option<&MetricValue> {
        self.data.get(ticker)?.get(metric)?.as_ref()
    }
}
