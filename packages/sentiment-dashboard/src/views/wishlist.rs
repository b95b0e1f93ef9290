//! Wishlist view

/// Render wishlist tickers as pills.
pub fn render(wishlist: &[String], error: Option<&str>) -> String {
    if error.is_some() {
        return "Could not load wishlist.\n".to_string();
    }
    if wishlist.is_empty() {
        return "Your wishlist is empty.\n".to_string();
    }

    let pills: Vec<String> = wishlist.iter().map(|t| format!("[{}]", t)).collect();
    format!("Wishlist: {}\n", pills.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_wishlist() {
        let list = vec!["MSFT".to_string(), "AAPL".to_string()];
        assert_eq!(render(&list, None), "Wishlist: [MSFT] [AAPL]\n");
        assert_eq!(render(&[], None), "Your wishlist is empty.\n");
        assert_eq!(render(&list, Some("boom")), "Could not load wishlist.\n");
    }
}
