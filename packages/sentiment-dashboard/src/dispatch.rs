//! Command dispatch
//!
//! User actions arrive as [`Command`] values. The [`Dispatcher`] performs the
//! backend calls each command needs and applies the results to
//! [`DashboardState`]. Views only ever read that state.

use anyhow::{anyhow, Context, Result};
use sentiment_core::{paginate, RawHolding, SectorChart, ValuationEngine};

use crate::api::types::WishlistAdd;
use crate::api::DashboardClient;
use crate::config::DashboardConfig;
use crate::state::{Comparison, DashboardState};
use crate::views::{ChartRenderer, ChartSlot, TextChartRenderer};

/// Name of the chart slot showing portfolio value by sector
pub const SECTOR_CHART_SLOT: &str = "sector-chart";

/// A user action
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch scored news for a ticker
    AnalyzeSentiment { ticker: String },
    /// Drop analysis results and reload the side lists
    ClearResults,
    /// Reload history and show the given page
    LoadHistory { page: usize },
    LoadWishlist,
    AddToWishlist { ticker: String },
    /// Fetch holdings and value them
    LoadPortfolio,
    /// Value the holdings already loaded
    RefreshValuation,
    AddHolding(RawHolding),
    RemoveHolding { ticker: String },
    Compare { tickers: Vec<String> },
}

/// Applies commands to dashboard state
pub struct Dispatcher<R: ChartRenderer = TextChartRenderer> {
    client: DashboardClient,
    engine: ValuationEngine,
    config: DashboardConfig,
    state: DashboardState,
    sector_chart: ChartSlot<R>,
}

impl Dispatcher<TextChartRenderer> {
    /// Create a dispatcher that draws charts as text
    pub fn new(client: DashboardClient, config: DashboardConfig) -> Self {
        Self::with_renderer(client, config, TextChartRenderer::default())
    }
}

impl<R: ChartRenderer> Dispatcher<R> {
    pub fn with_renderer(client: DashboardClient, config: DashboardConfig, renderer: R) -> Self {
        let engine = ValuationEngine::new().with_timeout(config.quote_timeout());
        Self {
            client,
            engine,
            config,
            state: DashboardState::new(),
            sector_chart: ChartSlot::new(SECTOR_CHART_SLOT, renderer),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn sector_chart(&self) -> &ChartSlot<R> {
        &self.sector_chart
    }

    /// Run a command. Failures are also recorded as the state's error message.
    pub async fn dispatch(&mut self, command: Command) -> Result<()> {
        tracing::debug!("Dispatching {:?}", command);

        let result = match command {
            Command::AnalyzeSentiment { ticker } => self.analyze_sentiment(&ticker).await,
            Command::ClearResults => {
                self.state.clear_results();
                self.refresh_side_lists().await;
                Ok(())
            }
            Command::LoadHistory { page } => self.load_history(page).await,
            Command::LoadWishlist => self.load_wishlist().await,
            Command::AddToWishlist { ticker } => self.add_to_wishlist(&ticker).await,
            Command::LoadPortfolio => self.load_portfolio().await,
            Command::RefreshValuation => {
                self.valuate().await;
                Ok(())
            }
            Command::AddHolding(holding) => self.add_holding(holding).await,
            Command::RemoveHolding { ticker } => self.remove_holding(&ticker).await,
            Command::Compare { tickers } => self.compare(tickers).await,
        };

        if let Err(e) = &result {
            tracing::warn!("Command failed: {:#}", e);
            self.state.set_error(format!("{:#}", e));
        }
        result
    }

    // ========================================================================
    // Sentiment
    // ========================================================================

    async fn analyze_sentiment(&mut self, ticker: &str) -> Result<()> {
        let ticker = ticker.trim().to_uppercase();
        self.state.clear_results();
        if ticker.is_empty() {
            return Err(anyhow!("Please enter a valid stock ticker."));
        }

        let analysis = self
            .client
            .analyze_news(&ticker)
            .await
            .context("An error occurred")?;

        if analysis.news.is_empty() {
            return Err(anyhow!(
                "No relevant news found for ticker {}. Please check the symbol.",
                ticker
            ));
        }

        tracing::info!(
            "Analyzed {} headlines for {} (score {:.4})",
            analysis.news.len(),
            ticker,
            analysis.overall_score
        );
        self.state.ticker = Some(ticker.clone());
        self.state.news = Some(analysis);

        self.refresh_side_lists().await;
        self.state.in_wishlist = self.state.is_wishlisted(&ticker);
        Ok(())
    }

    /// Reload history and wishlist. Failures are shown in place, not raised.
    async fn refresh_side_lists(&mut self) {
        if let Err(e) = self.load_history(1).await {
            tracing::error!("History fetch failed: {:#}", e);
        }
        if let Err(e) = self.load_wishlist().await {
            tracing::error!("Wishlist fetch failed: {:#}", e);
        }
    }

    // ========================================================================
    // History & Wishlist
    // ========================================================================

    async fn load_history(&mut self, page: usize) -> Result<()> {
        match self.client.history().await {
            Ok(history) => {
                self.state.history = history;
                self.state.history_error = None;
                let per_page = self.config.history_page_size;
                self.state.history_page = paginate(&self.state.history, page, per_page).page;
                Ok(())
            }
            Err(e) => {
                self.state.history_error = Some(e.to_string());
                Err(e.context("Could not load search history"))
            }
        }
    }

    async fn load_wishlist(&mut self) -> Result<()> {
        match self.client.wishlist().await {
            Ok(wishlist) => {
                self.state.wishlist = wishlist;
                self.state.wishlist_error = None;
                Ok(())
            }
            Err(e) => {
                self.state.wishlist_error = Some(e.to_string());
                Err(e.context("Could not load wishlist"))
            }
        }
    }

    async fn add_to_wishlist(&mut self, ticker: &str) -> Result<()> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(anyhow!("Please enter a valid stock ticker."));
        }

        match self.client.add_to_wishlist(&ticker).await? {
            WishlistAdd::Added => {
                self.state.notice = Some(format!("{} added to wishlist", ticker));
            }
            WishlistAdd::AlreadyPresent => {
                self.state.notice = Some(format!("{} is already in the wishlist", ticker));
            }
        }

        if self.state.ticker.as_deref() == Some(ticker.as_str()) {
            self.state.in_wishlist = true;
        }
        if let Err(e) = self.load_wishlist().await {
            tracing::error!("Wishlist fetch failed: {:#}", e);
        }
        Ok(())
    }

    // ========================================================================
    // Portfolio
    // ========================================================================

    async fn load_portfolio(&mut self) -> Result<()> {
        let holdings = self
            .client
            .portfolio()
            .await
            .context("Could not load portfolio")?;
        self.set_holdings(holdings).await;
        Ok(())
    }

    /// Replace the held holdings and run a valuation pass over them.
    pub async fn set_holdings(&mut self, holdings: Vec<RawHolding>) {
        self.state.holdings = holdings;
        self.valuate().await;
    }

    async fn valuate(&mut self) {
        let valuation = self
            .engine
            .valuate(&self.client, &self.state.holdings)
            .await;

        let chart = SectorChart::from_totals(
            &valuation.summary.sector_totals,
            &self.config.chart.palette,
            self.config.chart.overflow,
        );
        self.sector_chart.render(&chart);
        self.state.valuation = Some(valuation);
    }

    async fn add_holding(&mut self, holding: RawHolding) -> Result<()> {
        let validated = holding.validate()?;
        let message = self.client.add_holding(&RawHolding::from(&validated)).await?;
        tracing::info!("Added holding {}", validated.ticker);
        self.state.notice = Some(if message.is_empty() {
            format!("{} added to portfolio", validated.ticker)
        } else {
            message
        });
        self.load_portfolio().await
    }

    async fn remove_holding(&mut self, ticker: &str) -> Result<()> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(anyhow!("Please enter a valid stock ticker."));
        }
        let message = self.client.remove_holding(&ticker).await?;
        self.state.notice = Some(if message.is_empty() {
            format!("{} removed from portfolio", ticker)
        } else {
            message
        });
        self.load_portfolio().await
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    async fn compare(&mut self, tickers: Vec<String>) -> Result<()> {
        let tickers = normalize_tickers(&tickers);
        if tickers.len() < 2 {
            return Err(anyhow!("Enter at least two different tickers to compare."));
        }

        let report = self
            .client
            .compare(&tickers)
            .await
            .context("Comparison failed")?;
        self.state.comparison = Some(Comparison { tickers, report });
        Ok(())
    }
}

/// Trim, uppercase and de-duplicate tickers, keeping first-seen order.
pub fn normalize_tickers(tickers: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for ticker in tickers {
        let ticker = ticker.trim().to_uppercase();
        if !ticker.is_empty() && !seen.contains(&ticker) {
            seen.push(ticker);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tickers() {
        let input = vec![
            " aapl ".to_string(),
            "MSFT".to_string(),
            "AAPL".to_string(),
            "".to_string(),
        ];
        assert_eq!(normalize_tickers(&input), vec!["AAPL", "MSFT"]);
    }

    #[tokio::test]
    async fn test_empty_ticker_is_rejected_without_a_request() {
        // Nothing listens here; a request would fail with a different message
        let client = DashboardClient::new("http://127.0.0.1:9");
        let mut dispatcher = Dispatcher::new(client, DashboardConfig::default());

        let result = dispatcher
            .dispatch(Command::AnalyzeSentiment {
                ticker: "   ".to_string(),
            })
            .await;

        assert!(result.is_err());
        assert_eq!(
            dispatcher.state().error_message.as_deref(),
            Some("Please enter a valid stock ticker.")
        );
    }

    #[tokio::test]
    async fn test_compare_needs_two_tickers() {
        let client = DashboardClient::new("http://127.0.0.1:9");
        let mut dispatcher = Dispatcher::new(client, DashboardConfig::default());

        let result = dispatcher
            .dispatch(Command::Compare {
                tickers: vec!["aapl".to_string(), "AAPL".to_string()],
            })
            .await;

        assert!(result.is_err());
        assert!(dispatcher.state().comparison.is_none());
    }
}
