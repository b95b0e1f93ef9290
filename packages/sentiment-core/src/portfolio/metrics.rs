//! Per-holding valuation metrics.

use serde::{Deserialize, Serialize};

use crate::types::Holding;

/// Direction of a position's unrealized result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Gain,
    Loss,
    Flat,
}

impl Trend {
    fn from_profit_loss(profit_loss: f64) -> Self {
        if profit_loss > 0.0 {
            Trend::Gain
        } else if profit_loss < 0.0 {
            Trend::Loss
        } else {
            Trend::Flat
        }
    }
}

/// Metrics for a holding whose quote was retrieved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HoldingMetrics {
    pub quantity: f64,
    pub purchase_price: f64,
    pub current_price: f64,
    /// quantity * current price
    pub holding_value: f64,
    /// quantity * purchase price
    pub cost_basis: f64,
    pub profit_loss: f64,
    /// `None` when the cost basis is zero
    pub profit_loss_percent: Option<f64>,
    pub hit_target: bool,
    pub hit_stop_loss: bool,
    pub trend: Trend,
}

impl HoldingMetrics {
    /// Calculate metrics for a holding at the given market price.
    pub fn compute(holding: &Holding, current_price: f64) -> Self {
        let holding_value = holding.quantity * current_price;
        let cost_basis = holding.cost_basis();
        let profit_loss = holding_value - cost_basis;
        let profit_loss_percent = if cost_basis != 0.0 {
            Some((profit_loss / cost_basis) * 100.0)
        } else {
            None
        };

        Self {
            quantity: holding.quantity,
            purchase_price: holding.purchase_price,
            current_price,
            holding_value,
            cost_basis,
            profit_loss,
            profit_loss_percent,
            hit_target: holding
                .target_price
                .is_some_and(|target| current_price >= target),
            hit_stop_loss: holding
                .stop_loss_price
                .is_some_and(|stop| current_price <= stop),
            trend: Trend::from_profit_loss(profit_loss),
        }
    }

    /// Whether every derived amount is a finite number.
    pub fn is_finite(&self) -> bool {
        self.holding_value.is_finite()
            && self.cost_basis.is_finite()
            && self.profit_loss.is_finite()
            && self.profit_loss_percent.map_or(true, f64::is_finite)
    }
}

/// Why a holding has no metrics in this pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum UnavailableReason {
    /// Network error, non-success status or malformed body
    QuoteFailed(String),
    /// The quote did not settle within the engine's timeout
    TimedOut,
    /// Quantity, purchase price, ticker or sector could not be used
    InvalidInput(String),
}

impl std::fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnavailableReason::QuoteFailed(message) => write!(f, "quote failed: {}", message),
            UnavailableReason::TimedOut => write!(f, "quote timed out"),
            UnavailableReason::InvalidInput(message) => write!(f, "invalid input: {}", message),
        }
    }
}

/// Outcome of valuing one holding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HoldingStatus {
    Priced(HoldingMetrics),
    Unavailable { reason: UnavailableReason },
}

/// Result row for a single holding, in input order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HoldingValuation {
    pub ticker: String,
    pub sector: String,
    #[serde(flatten)]
    pub status: HoldingStatus,
}

impl HoldingValuation {
    /// A priced result for a holding.
    pub fn priced(holding: &Holding, current_price: f64) -> Self {
        Self::with_metrics(holding, HoldingMetrics::compute(holding, current_price))
    }

    /// A priced result with metrics already computed.
    pub fn with_metrics(holding: &Holding, metrics: HoldingMetrics) -> Self {
        Self {
            ticker: holding.ticker.clone(),
            sector: holding.sector.clone(),
            status: HoldingStatus::Priced(metrics),
        }
    }

    /// A result whose metrics are unavailable.
    pub fn unavailable(
        ticker: impl Into<String>,
        sector: impl Into<String>,
        reason: UnavailableReason,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            sector: sector.into(),
            status: HoldingStatus::Unavailable { reason },
        }
    }

    /// Metrics, if the holding was priced.
    pub fn metrics(&self) -> Option<&HoldingMetrics> {
        match &self.status {
            HoldingStatus::Priced(metrics) => Some(metrics),
            HoldingStatus::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.metrics().is_some()
    }
}
