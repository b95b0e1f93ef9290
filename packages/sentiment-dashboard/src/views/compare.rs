//! Multi-ticker comparison view

use crate::state::Comparison;

/// Render a metric-by-ticker table, marking the best and worst ticker per
/// metric.
pub fn render(comparison: &Comparison) -> String {
    let report = &comparison.report;
    if report.metrics.is_empty() {
        return "No comparison data.\n".to_string();
    }

    let metric_width = report
        .metrics
        .iter()
        .map(|m| m.chars().count())
        .max()
        .unwrap_or(0)
        .max("Metric".len());

    let mut out = format!("{:<width$}", "Metric", width = metric_width);
    for ticker in &comparison.tickers {
        out.push_str(&format!("  {:>18}", ticker));
    }
    out.push('\n');

    for metric in &report.metrics {
        out.push_str(&format!("{:<width$}", metric, width = metric_width));
        let ranking = report.ranking.get(metric);
        for ticker in &comparison.tickers {
            let mut cell = report
                .value(ticker, metric)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            if let Some(ranking) = ranking {
                if &ranking.best == ticker {
                    cell.push_str(" (best)");
                } else if &ranking.worst == ticker {
                    cell.push_str(" (worst)");
                }
            }
            out.push_str(&format!("  {:>18}", cell));
        }
        out.push('\n');
    }
    out
}
