//! Concurrent portfolio valuation.
//!
//! A valuation pass validates every holding, requests one quote per valid
//! holding with all requests in flight at once, and then folds the settled
//! results into a [`PortfolioSummary`] in input order.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use super::metrics::{HoldingMetrics, HoldingValuation, UnavailableReason};
use super::summary::PortfolioSummary;
use crate::types::{Holding, Quote, RawHolding};
use crate::{Error, Result};

/// Default upper bound for a single quote request.
pub const DEFAULT_QUOTE_TIMEOUT: Duration = Duration::from_secs(5);

/// Anything that can supply a current market price for a ticker.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn quote(&self, ticker: &str) -> Result<Quote>;
}

/// Per-holding results plus the aggregate summary of one pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioValuation {
    pub holdings: Vec<HoldingValuation>,
    pub summary: PortfolioSummary,
}

/// Runs valuation passes against a [`QuoteSource`].
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    quote_timeout: Option<Duration>,
}

impl ValuationEngine {
    /// Create an engine with the default quote timeout.
    pub fn new() -> Self {
        Self {
            quote_timeout: Some(DEFAULT_QUOTE_TIMEOUT),
        }
    }

    /// Set the per-request timeout. `None` waits for every quote indefinitely.
    pub fn with_timeout(mut self, quote_timeout: Option<Duration>) -> Self {
        self.quote_timeout = quote_timeout;
        self
    }

    pub fn quote_timeout(&self) -> Option<Duration> {
        self.quote_timeout
    }

    /// Value already-validated holdings.
    pub async fn valuate_holdings<S>(&self, source: &S, holdings: &[Holding]) -> PortfolioValuation
    where
        S: QuoteSource + ?Sized,
    {
        let raw: Vec<RawHolding> = holdings.iter().map(RawHolding::from).collect();
        self.valuate(source, &raw).await
    }

    /// Value raw holdings.
    ///
    /// Holdings that fail validation are reported as unavailable and never
    /// reach the quote source. The pass never fails as a whole.
    pub async fn valuate<S>(&self, source: &S, holdings: &[RawHolding]) -> PortfolioValuation
    where
        S: QuoteSource + ?Sized,
    {
        tracing::debug!("Valuing {} holdings", holdings.len());

        let pending = holdings.iter().map(|raw| self.valuate_one(source, raw));
        // join_all yields results in input order whatever order they settle in
        let results = join_all(pending).await;

        let summary = PortfolioSummary::from_results(&results);

        tracing::info!(
            "Valuation pass finished: {} priced, {} unavailable, total value {:.2}",
            summary.priced_count,
            summary.unavailable_count,
            summary.total_value
        );

        PortfolioValuation {
            holdings: results,
            summary,
        }
    }

    async fn valuate_one<S>(&self, source: &S, raw: &RawHolding) -> HoldingValuation
    where
        S: QuoteSource + ?Sized,
    {
        let holding = match raw.validate() {
            Ok(holding) => holding,
            Err(e) => {
                tracing::warn!("Skipping holding {}: {}", raw.ticker, e);
                return HoldingValuation::unavailable(
                    raw.ticker.trim().to_uppercase(),
                    raw.sector.trim(),
                    UnavailableReason::InvalidInput(e.to_string()),
                );
            }
        };

        match self.fetch_quote(source, &holding.ticker).await {
            Ok(quote) => {
                let metrics = HoldingMetrics::compute(&holding, quote.current_price);
                if !metrics.is_finite() {
                    tracing::warn!("Values for {} overflow, skipping", holding.ticker);
                    return HoldingValuation::unavailable(
                        holding.ticker.clone(),
                        holding.sector,
                        UnavailableReason::InvalidInput(format!(
                            "{}: position value is out of range",
                            holding.ticker
                        )),
                    );
                }
                HoldingValuation::with_metrics(&holding, metrics)
            }
            Err(e) => {
                tracing::warn!("Quote unavailable for {}: {}", holding.ticker, e);
                let reason = match e {
                    Error::Timeout { .. } => UnavailableReason::TimedOut,
                    Error::Quote { message, .. } => UnavailableReason::QuoteFailed(message),
                    other => UnavailableReason::QuoteFailed(other.to_string()),
                };
                HoldingValuation::unavailable(holding.ticker, holding.sector, reason)
            }
        }
    }

    async fn fetch_quote<S>(&self, source: &S, ticker: &str) -> Result<Quote>
    where
        S: QuoteSource + ?Sized,
    {
        let request = source.quote(ticker);
        let quote = match self.quote_timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| Error::Timeout {
                    ticker: ticker.to_string(),
                })??,
            None => request.await?,
        };
        quote.validated()
    }
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::new()
    }
}
