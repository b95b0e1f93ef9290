//! Search history view

use sentiment_core::{Page, Sentiment};

use crate::api::types::HistoryEntry;
use crate::views::score;

/// Render one page of history, or the load error if there is one.
pub fn render(page: &Page<&HistoryEntry>, error: Option<&str>) -> String {
    if error.is_some() {
        return "Could not load search history.\n".to_string();
    }
    if page.total_items == 0 {
        return "No previous searches found.\n".to_string();
    }

    let mut out = format!("{:<8} {:<20} {}\n", "Ticker", "Score", "Date");
    for entry in &page.items {
        let scored = format!("{} ({})", score(entry.score), Sentiment::from_score(entry.score));
        out.push_str(&format!(
            "{:<8} {:<20} {}\n",
            entry.ticker,
            scored,
            entry.timestamp.format("%Y-%m-%d")
        ));
    }

    out.push_str(&format!(
        "Page {} of {} ({} entries){}{}\n",
        page.page,
        page.total_pages,
        page.total_items,
        if page.has_previous() { "  < prev" } else { "" },
        if page.has_next() { "  next >" } else { "" },
    ));
    out
}
