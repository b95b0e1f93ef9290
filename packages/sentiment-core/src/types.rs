//! Core data types for the sentiment dashboard.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A validated portfolio position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Holding {
    /// Stock ticker symbol (uppercase)
    pub ticker: String,
    /// Sector label used as the aggregation key
    pub sector: String,
    /// Number of shares held
    pub quantity: f64,
    /// Cost basis per share
    pub purchase_price: f64,
    /// Price at which the position is considered to have reached its target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_price: Option<f64>,
    /// Price at or below which the stop-loss fires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss_price: Option<f64>,
}

impl Holding {
    /// Create a new holding without alert thresholds.
    pub fn new(ticker: &str, sector: &str, quantity: f64, purchase_price: f64) -> Self {
        Self {
            ticker: ticker.trim().to_uppercase(),
            sector: sector.trim().to_string(),
            quantity,
            purchase_price,
            target_price: None,
            stop_loss_price: None,
        }
    }

    /// Set the target price.
    pub fn with_target(mut self, target_price: f64) -> Self {
        self.target_price = Some(target_price);
        self
    }

    /// Set the stop-loss price.
    pub fn with_stop_loss(mut self, stop_loss_price: f64) -> Self {
        self.stop_loss_price = Some(stop_loss_price);
        self
    }

    /// Total amount paid for the position.
    pub fn cost_basis(&self) -> f64 {
        self.quantity * self.purchase_price
    }
}

/// A numeric field as it arrives from page state or the backend: either a
/// JSON number or a string that should contain one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Parse into a finite number, if possible.
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            RawNumber::Number(n) => *n,
            RawNumber::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

/// An unvalidated holding, as supplied by the portfolio endpoint or a
/// holdings file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawHolding {
    pub ticker: String,
    #[serde(default)]
    pub sector: String,
    pub quantity: RawNumber,
    pub purchase_price: RawNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_price: Option<RawNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss_price: Option<RawNumber>,
}

impl RawHolding {
    /// Validate into a [`Holding`].
    ///
    /// Quantity and purchase price must be finite and non-negative. Target
    /// and stop-loss values that fail to parse are treated as not set.
    pub fn validate(&self) -> Result<Holding> {
        let ticker = self.ticker.trim();
        if ticker.is_empty() {
            return Err(Error::InvalidHolding("ticker is empty".to_string()));
        }
        let sector = self.sector.trim();
        if sector.is_empty() {
            return Err(Error::InvalidHolding(format!("{}: sector is empty", ticker)));
        }

        let quantity = required(ticker, "quantity", &self.quantity)?;
        let purchase_price = required(ticker, "purchase price", &self.purchase_price)?;

        Ok(Holding {
            ticker: ticker.to_uppercase(),
            sector: sector.to_string(),
            quantity,
            purchase_price,
            target_price: self.target_price.as_ref().and_then(RawNumber::parse),
            stop_loss_price: self.stop_loss_price.as_ref().and_then(RawNumber::parse),
        })
    }
}

fn required(ticker: &str, field: &str, raw: &RawNumber) -> Result<f64> {
    match raw.parse() {
        Some(value) if value >= 0.0 => Ok(value),
        Some(value) => Err(Error::InvalidHolding(format!(
            "{}: {} must not be negative (got {})",
            ticker, field, value
        ))),
        None => Err(Error::InvalidHolding(format!(
            "{}: {} is not a number ({:?})",
            ticker, field, raw
        ))),
    }
}

impl From<&Holding> for RawHolding {
    fn from(holding: &Holding) -> Self {
        Self {
            ticker: holding.ticker.clone(),
            sector: holding.sector.clone(),
            quantity: holding.quantity.into(),
            purchase_price: holding.purchase_price.into(),
            target_price: holding.target_price.map(RawNumber::from),
            stop_loss_price: holding.stop_loss_price.map(RawNumber::from),
        }
    }
}

/// Current market price for a ticker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    pub ticker: String,
    pub current_price: f64,
}

impl Quote {
    /// Create a new quote.
    pub fn new(ticker: &str, current_price: f64) -> Self {
        Self {
            ticker: ticker.to_uppercase(),
            current_price,
        }
    }

    /// Reject prices that cannot be a market price.
    pub fn validated(self) -> Result<Self> {
        if self.current_price.is_finite() && self.current_price >= 0.0 {
            Ok(self)
        } else {
            Err(Error::quote(
                self.ticker,
                format!("malformed price {}", self.current_price),
            ))
        }
    }
}

/// API response wrapper used for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(quantity: RawNumber, purchase: RawNumber) -> RawHolding {
        RawHolding {
            ticker: "aapl".to_string(),
            sector: "Tech".to_string(),
            quantity,
            purchase_price: purchase,
            target_price: None,
            stop_loss_price: None,
        }
    }

    #[test]
    fn test_holding_new() {
        let holding = Holding::new("aapl", "Tech", 10.0, 150.0);
        assert_eq!(holding.ticker, "AAPL");
        assert_eq!(holding.cost_basis(), 1500.0);
        assert!(holding.target_price.is_none());
        assert!(holding.stop_loss_price.is_none());
    }

    #[test]
    fn test_validate_accepts_numeric_strings() {
        let holding = raw("10".into(), " 99.5 ".into()).validate().unwrap();
        assert_eq!(holding.ticker, "AAPL");
        assert_eq!(holding.quantity, 10.0);
        assert_eq!(holding.purchase_price, 99.5);
    }

    #[test]
    fn test_validate_rejects_bad_required_fields() {
        assert!(matches!(
            raw("ten".into(), 100.0.into()).validate(),
            Err(Error::InvalidHolding(_))
        ));
        assert!(matches!(
            raw(10.0.into(), (-1.0).into()).validate(),
            Err(Error::InvalidHolding(_))
        ));
        assert!(matches!(
            raw("NaN".into(), 100.0.into()).validate(),
            Err(Error::InvalidHolding(_))
        ));
    }

    #[test]
    fn test_validate_rejects_missing_labels() {
        let mut holding = raw(1.0.into(), 1.0.into());
        holding.sector = "  ".to_string();
        assert!(holding.validate().is_err());

        holding.sector = "Tech".to_string();
        holding.ticker = String::new();
        assert!(holding.validate().is_err());
    }

    #[test]
    fn test_unparseable_thresholds_are_not_set() {
        let mut holding = raw(1.0.into(), 1.0.into());
        holding.target_price = Some("".into());
        holding.stop_loss_price = Some("abc".into());
        let holding = holding.validate().unwrap();
        assert!(holding.target_price.is_none());
        assert!(holding.stop_loss_price.is_none());

        let mut holding = raw(1.0.into(), 1.0.into());
        holding.target_price = Some("120".into());
        holding.stop_loss_price = Some(80.0.into());
        let holding = holding.validate().unwrap();
        assert_eq!(holding.target_price, Some(120.0));
        assert_eq!(holding.stop_loss_price, Some(80.0));
    }

    #[test]
    fn test_raw_holding_from_json() {
        let json = r#"{"ticker":"xom","sector":"Energy","quantity":"5","purchase_price":80,"target_price":null}"#;
        let raw: RawHolding = serde_json::from_str(json).unwrap();
        let holding = raw.validate().unwrap();
        assert_eq!(holding.ticker, "XOM");
        assert_eq!(holding.quantity, 5.0);
        assert_eq!(holding.purchase_price, 80.0);
        assert!(holding.target_price.is_none());
    }

    #[test]
    fn test_quote_validated() {
        assert!(Quote::new("AAPL", 0.0).validated().is_ok());
        assert!(Quote::new("AAPL", -1.0).validated().is_err());
        assert!(Quote::new("AAPL", f64::INFINITY).validated().is_err());
    }

    #[test]
    fn test_api_response() {
        let response: ApiResponse<String> = ApiResponse::ok("test".to_string());
        assert!(response.ok);
        assert_eq!(response.data, Some("test".to_string()));

        let err_response: ApiResponse<String> = ApiResponse::err("error");
        assert!(!err_response.ok);
        assert_eq!(err_response.error, Some("error".to_string()));
    }
}
