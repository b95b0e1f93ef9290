//! News sentiment view

use crate::api::types::NewsAnalysis;
use crate::views::score;

/// Render a news analysis for `ticker`.
pub fn render(ticker: &str, analysis: &NewsAnalysis, in_wishlist: bool) -> String {
    let mut out = format!(
        "{}  average score {} ({}){}\n",
        ticker,
        score(analysis.overall_score),
        analysis.sentiment(),
        if in_wishlist { "  [wishlist]" } else { "" }
    );

    for item in &analysis.news {
        out.push_str(&format!("\n{}  [{}]\n", item.headline, item.sentiment()));
        if !item.summary.is_empty() {
            out.push_str(&format!("  {}\n", item.summary));
        }
        out.push_str(&format!("  Score: {}\n", score(item.sentiment_score)));
    }
    out
}
