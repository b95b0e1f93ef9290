//! Whole-portfolio aggregation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::metrics::{HoldingValuation, Trend};

/// Overall outcome of a valuation pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValuationStatus {
    /// No holdings were supplied
    Empty,
    /// Every holding was priced
    Complete,
    /// Some holdings were priced, some were not
    Partial,
    /// Holdings were supplied but none could be priced
    Unavailable,
}

/// Portfolio totals over the holdings that were priced in a pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Sum of holding values
    pub total_value: f64,
    /// Sum of cost bases
    pub total_cost: f64,
    /// total_value - total_cost
    pub total_profit_loss: f64,
    /// `None` when the total cost is zero
    pub total_return_percent: Option<f64>,
    /// Holding value summed per sector
    pub sector_totals: BTreeMap<String, f64>,
    pub status: ValuationStatus,
    pub priced_count: usize,
    pub unavailable_count: usize,
    pub positions_in_profit: usize,
    pub positions_in_loss: usize,
    pub targets_hit: usize,
    pub stop_losses_hit: usize,
    pub valued_at: DateTime<Utc>,
}

impl PortfolioSummary {
    /// Build a summary from finished per-holding results.
    pub fn from_results(results: &[HoldingValuation]) -> Self {
        results
            .iter()
            .fold(SummaryBuilder::default(), |mut builder, result| {
                builder.add(result);
                builder
            })
            .finish()
    }

    /// Fraction of the total value held in each sector.
    pub fn sector_weights(&self) -> Vec<(String, f64)> {
        if self.total_value <= 0.0 {
            return Vec::new();
        }

        self.sector_totals
            .iter()
            .map(|(sector, value)| (sector.clone(), value / self.total_value))
            .collect()
    }
}

/// Accumulator that folds settled holdings into a summary one at a time.
#[derive(Debug, Default)]
pub struct SummaryBuilder {
    total_value: f64,
    total_cost: f64,
    sector_totals: BTreeMap<String, f64>,
    priced_count: usize,
    unavailable_count: usize,
    positions_in_profit: usize,
    positions_in_loss: usize,
    targets_hit: usize,
    stop_losses_hit: usize,
}

impl SummaryBuilder {
    /// Fold one holding result into the running totals.
    pub fn add(&mut self, result: &HoldingValuation) {
        let Some(metrics) = result.metrics() else {
            self.unavailable_count += 1;
            return;
        };

        self.priced_count += 1;
        self.total_value += metrics.holding_value;
        self.total_cost += metrics.cost_basis;
        *self
            .sector_totals
            .entry(result.sector.clone())
            .or_insert(0.0) += metrics.holding_value;

        match metrics.trend {
            Trend::Gain => self.positions_in_profit += 1,
            Trend::Loss => self.positions_in_loss += 1,
            Trend::Flat => {}
        }
        if metrics.hit_target {
            self.targets_hit += 1;
        }
        if metrics.hit_stop_loss {
            self.stop_losses_hit += 1;
        }
    }

    /// Finish the pass.
    pub fn finish(self) -> PortfolioSummary {
        let total_profit_loss = self.total_value - self.total_cost;
        let total_return_percent = if self.total_cost != 0.0 {
            Some((total_profit_loss / self.total_cost) * 100.0).filter(|p| p.is_finite())
        } else {
            None
        };

        let status = match (self.priced_count, self.unavailable_count) {
            (0, 0) => ValuationStatus::Empty,
            (_, 0) => ValuationStatus::Complete,
            (0, _) => ValuationStatus::Unavailable,
            _ => ValuationStatus::Partial,
        };

        PortfolioSummary {
            total_value: self.total_value,
            total_cost: self.total_cost,
            total_profit_loss,
            total_return_percent,
            sector_totals: self.sector_totals,
            status,
            priced_count: self.priced_count,
            unavailable_count: self.unavailable_count,
            positions_in_profit: self.positions_in_profit,
            positions_in_loss: self.positions_in_loss,
            targets_hit: self.targets_hit,
            stop_losses_hit: self.stop_losses_hit,
            valued_at: Utc::now(),
        }
    }
}
