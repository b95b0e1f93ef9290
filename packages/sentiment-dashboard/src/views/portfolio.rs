//! Portfolio valuation view

use sentiment_core::{HoldingStatus, PortfolioSummary, PortfolioValuation, ValuationStatus};

use crate::views::{money, percent, UNAVAILABLE};

/// Render the holdings table followed by the summary block.
pub fn render(valuation: &PortfolioValuation) -> String {
    if valuation.summary.status == ValuationStatus::Empty {
        return "No holdings.\n".to_string();
    }

    let mut out = format!(
        "{:<8} {:<14} {:>10} {:>10} {:>10} {:>12} {:>12} {:>9}  {}\n",
        "Ticker", "Sector", "Qty", "Purchase", "Current", "Value", "P/L", "P/L %", "Alerts"
    );

    for row in &valuation.holdings {
        match &row.status {
            HoldingStatus::Priced(m) => {
                let mut alerts = Vec::new();
                if m.hit_target {
                    alerts.push("target hit");
                }
                if m.hit_stop_loss {
                    alerts.push("stop-loss hit");
                }
                out.push_str(&format!(
                    "{:<8} {:<14} {:>10} {:>10} {:>10} {:>12} {:>12} {:>9}  {}\n",
                    row.ticker,
                    row.sector,
                    m.quantity,
                    money(m.purchase_price),
                    money(m.current_price),
                    money(m.holding_value),
                    money(m.profit_loss),
                    percent(m.profit_loss_percent),
                    alerts.join(", "),
                ));
            }
            HoldingStatus::Unavailable { reason } => {
                out.push_str(&format!(
                    "{:<8} {:<14} {:>10} {:>10} {:>10} {:>12} {:>12} {:>9}  {}\n",
                    row.ticker,
                    row.sector,
                    UNAVAILABLE,
                    UNAVAILABLE,
                    UNAVAILABLE,
                    UNAVAILABLE,
                    UNAVAILABLE,
                    UNAVAILABLE,
                    reason,
                ));
            }
        }
    }

    out.push('\n');
    out.push_str(&render_summary(&valuation.summary));
    out
}

/// Render portfolio totals.
pub fn render_summary(summary: &PortfolioSummary) -> String {
    match summary.status {
        ValuationStatus::Empty => return "No holdings.\n".to_string(),
        ValuationStatus::Unavailable => {
            return format!(
                "No quotes could be retrieved for {} holdings.\n",
                summary.unavailable_count
            )
        }
        ValuationStatus::Complete | ValuationStatus::Partial => {}
    }

    let mut out = format!(
        "Total value:  {}\nTotal cost:   {}\nProfit/loss:  {} ({})\n",
        money(summary.total_value),
        money(summary.total_cost),
        money(summary.total_profit_loss),
        percent(summary.total_return_percent),
    );
    out.push_str(&format!(
        "Positions:    {} in profit, {} in loss",
        summary.positions_in_profit, summary.positions_in_loss
    ));
    if summary.targets_hit > 0 || summary.stop_losses_hit > 0 {
        out.push_str(&format!(
            ", {} targets hit, {} stop-losses hit",
            summary.targets_hit, summary.stop_losses_hit
        ));
    }
    out.push('\n');
    if summary.status == ValuationStatus::Partial {
        out.push_str(&format!(
            "Excluded:     {} holdings without a quote\n",
            summary.unavailable_count
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiment_core::{Holding, HoldingValuation, UnavailableReason};

    fn valuation(rows: Vec<HoldingValuation>) -> PortfolioValuation {
        let summary = PortfolioSummary::from_results(&rows);
        PortfolioValuation {
            holdings: rows,
            summary,
        }
    }

    #[test]
    fn test_render_priced_and_unavailable_rows() {
        let text = render(&valuation(vec![
            HoldingValuation::priced(
                &Holding::new("AAPL", "Tech", 10.0, 100.0).with_target(140.0),
                150.0,
            ),
            HoldingValuation::unavailable("XOM", "Energy", UnavailableReason::TimedOut),
        ]));

        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("AAPL"));
        assert!(lines[1].contains("1500.00"));
        assert!(lines[1].contains("+50.00%"));
        assert!(lines[1].contains("target hit"));
        assert!(lines[2].starts_with("XOM"));
        assert!(lines[2].contains("N/A"));
        assert!(lines[2].contains("quote timed out"));
        assert!(text.contains("Total value:  1500.00"));
        assert!(text.contains("Excluded:     1 holdings without a quote"));
    }

    #[test]
    fn test_zero_cost_percent_is_not_applicable() {
        let text = render(&valuation(vec![HoldingValuation::priced(
            &Holding::new("GIFT", "Misc", 1.0, 0.0),
            5.0,
        )]));
        assert!(text.lines().nth(1).unwrap().contains("n/a"));
        assert!(text.contains("Profit/loss:  5.00 (n/a)"));
        assert!(!text.contains("inf"));
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn test_empty_and_all_failed() {
        assert_eq!(render(&valuation(Vec::new())), "No holdings.\n");

        let text = render(&valuation(vec![HoldingValuation::unavailable(
            "AAPL",
            "Tech",
            UnavailableReason::QuoteFailed("503".to_string()),
        )]));
        assert!(text.contains("No quotes could be retrieved for 1 holdings."));
    }
}
