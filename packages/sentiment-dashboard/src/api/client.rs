//! Dashboard backend HTTP client implementation

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use sentiment_core::{Quote, QuoteSource, RawHolding};

use super::types::*;

/// A non-2xx response from the backend
#[derive(Debug, Clone, thiserror::Error)]
#[error("Request failed: {status} {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Whether `err` is an [`ApiError`] with the given status.
    pub fn has_status(err: &anyhow::Error, status: StatusCode) -> bool {
        err.downcast_ref::<ApiError>()
            .is_some_and(|api| api.status == status)
    }
}

/// HTTP client for the dashboard backend
#[derive(Debug, Clone)]
pub struct DashboardClient {
    base_url: String,
    client: Client,
}

impl DashboardClient {
    /// Create a new client with the given base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Internal HTTP Methods
    // ========================================================================

    /// Make a GET request
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    /// Build an endpoint URL whose path segments are percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Base URL {} cannot take a path", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a GET request to a prepared URL
    async fn get_url<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.client.get(url).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Make a GET request with query parameters
    async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    /// Make a POST request
    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    // ========================================================================
    // News API
    // ========================================================================

    /// Fetch scored news for a ticker
    pub async fn analyze_news(&self, ticker: &str) -> Result<NewsAnalysis> {
        self.get_query("/api/news", &[("ticker", ticker)]).await
    }

    // ========================================================================
    // History API
    // ========================================================================

    /// Fetch previous analyses, newest first
    pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
        let response: HistoryResponse = self.get("/api/history").await?;
        Ok(response.history)
    }

    // ========================================================================
    // Wishlist API
    // ========================================================================

    /// Fetch the wishlist, newest first
    pub async fn wishlist(&self) -> Result<Vec<String>> {
        let response: WishlistResponse = self.get("/api/wishlist").await?;
        Ok(response.wishlist)
    }

    /// Add a ticker to the wishlist
    ///
    /// A conflict response means the ticker is already present and is not
    /// treated as an error.
    pub async fn add_to_wishlist(&self, ticker: &str) -> Result<WishlistAdd> {
        match self
            .post::<MessageResponse, _>("/api/wishlist/add", &TickerRequest { ticker })
            .await
        {
            Ok(_) => Ok(WishlistAdd::Added),
            Err(e) if ApiError::has_status(&e, StatusCode::CONFLICT) => {
                tracing::warn!("Could not add to wishlist: {}", e);
                Ok(WishlistAdd::AlreadyPresent)
            }
            Err(e) => Err(e),
        }
    }

    // ========================================================================
    // Portfolio API
    // ========================================================================

    /// Fetch the stored holdings
    pub async fn portfolio(&self) -> Result<Vec<RawHolding>> {
        let response: PortfolioResponse = self.get("/api/portfolio").await?;
        Ok(response.portfolio)
    }

    /// Store a new holding
    pub async fn add_holding(&self, holding: &RawHolding) -> Result<String> {
        let response: MessageResponse = self.post("/api/portfolio/add", holding).await?;
        Ok(response.message)
    }

    /// Remove a holding by ticker
    pub async fn remove_holding(&self, ticker: &str) -> Result<String> {
        let response: MessageResponse = self
            .post("/api/portfolio/remove", &TickerRequest { ticker })
            .await?;
        Ok(response.message)
    }

    /// Fetch the current price for a ticker
    pub async fn current_price(&self, ticker: &str) -> Result<f64> {
        let url = self.endpoint(&["api", "quote", ticker])?;
        let response: QuoteResponse = self.get_url(url).await?;
        Ok(response.current_price)
    }

    // ========================================================================
    // Comparison API
    // ========================================================================

    /// Compare metrics across tickers
    pub async fn compare(&self, tickers: &[String]) -> Result<ComparisonReport> {
        self.post("/api/compare", &CompareRequest { tickers }).await
    }
}

#[async_trait]
impl QuoteSource for DashboardClient {
    async fn quote(&self, ticker: &str) -> sentiment_core::Result<Quote> {
        self.current_price(ticker)
            .await
            .map(|price| Quote::new(ticker, price))
            .map_err(|e| sentiment_core::Error::quote(ticker, e.to_string()))
    }
}

/// Turn a non-2xx response into an [`ApiError`]
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .ok()
        .and_then(|envelope| envelope.error)
        .unwrap_or(body);

    Err(ApiError { status, message }.into())
}
