// tests/client.rs

use mockito::{Matcher, Server};
use reqwest::StatusCode;
use sentiment_core::{QuoteSource, RawHolding, RawNumber};
use sentiment_dashboard::api::types::{MetricValue, WishlistAdd};
use sentiment_dashboard::{ApiError, DashboardClient};

#[tokio::test]
async fn test_analyze_news() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/news")
        .match_query(Matcher::UrlEncoded("ticker".into(), "AAPL".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "news": [
                    {"headline": "Apple beats estimates", "summary": "Revenue up", "sentiment_score": 0.62},
                    {"headline": "Supply concerns", "summary": "", "sentiment_score": -0.3}
                ],
                "overall_score": 0.16
            }"#,
        )
        .create_async()
        .await;

    let client = DashboardClient::new(&server.url());
    let analysis = client.analyze_news("AAPL").await.unwrap();

    mock.assert_async().await;
    assert_eq!(analysis.news.len(), 2);
    assert_eq!(analysis.news[0].headline, "Apple beats estimates");
    assert_eq!(analysis.sentiment().label(), "Positive");
    assert_eq!(analysis.news[1].sentiment().label(), "Negative");
}

#[tokio::test]
async fn test_history_and_wishlist() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/history")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"history": [
                {"ticker": "MSFT", "score": 0.05, "timestamp": "2025-03-02"},
                {"ticker": "AAPL", "score": 0.21, "timestamp": "2025-03-01"}
            ]}"#,
        )
        .create_async()
        .await;
    server
        .mock("GET", "/api/wishlist")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"wishlist": ["TSLA", "AAPL"]}"#)
        .create_async()
        .await;

    let client = DashboardClient::new(&server.url());

    let history = client.history().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].ticker, "MSFT");

    let wishlist = client.wishlist().await.unwrap();
    assert_eq!(wishlist, vec!["TSLA", "AAPL"]);
}

#[tokio::test]
async fn test_add_to_wishlist_created() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/wishlist/add")
        .match_body(Matcher::Json(serde_json::json!({"ticker": "NVDA"})))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Added to wishlist"}"#)
        .create_async()
        .await;

    let client = DashboardClient::new(&server.url());
    let result = client.add_to_wishlist("NVDA").await.unwrap();

    mock.assert_async().await;
    assert_eq!(result, WishlistAdd::Added);
}

#[tokio::test]
async fn test_add_to_wishlist_conflict_is_not_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/wishlist/add")
        .with_status(409)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Ticker already in wishlist"}"#)
        .create_async()
        .await;

    let client = DashboardClient::new(&server.url());
    let result = client.add_to_wishlist("AAPL").await.unwrap();
    assert_eq!(result, WishlistAdd::AlreadyPresent);
}

#[tokio::test]
async fn test_error_envelope_becomes_api_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/news")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Upstream news provider unavailable"}"#)
        .create_async()
        .await;

    let client = DashboardClient::new(&server.url());
    let err = client.analyze_news("AAPL").await.unwrap_err();

    assert!(ApiError::has_status(&err, StatusCode::INTERNAL_SERVER_ERROR));
    let api = err.downcast_ref::<ApiError>().unwrap();
    assert_eq!(api.message, "Upstream news provider unavailable");
}

#[tokio::test]
async fn test_plain_error_body_is_kept() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/wishlist")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let client = DashboardClient::new(&server.url());
    let err = client.wishlist().await.unwrap_err();
    let api = err.downcast_ref::<ApiError>().unwrap();
    assert_eq!(api.status, StatusCode::BAD_GATEWAY);
    assert_eq!(api.message, "Bad Gateway");
}

#[tokio::test]
async fn test_quote_source() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/quote/AAPL")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"current_price": 180.25}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/quote/ZZZZ")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Unknown ticker"}"#)
        .create_async()
        .await;

    let client = DashboardClient::new(&server.url());

    let quote = client.quote("AAPL").await.unwrap();
    assert_eq!(quote.ticker, "AAPL");
    assert_eq!(quote.current_price, 180.25);

    let err = client.quote("ZZZZ").await.unwrap_err();
    assert!(err.to_string().contains("ZZZZ"));
    assert!(err.to_string().contains("Unknown ticker"));
}

#[tokio::test]
async fn test_quote_ticker_is_one_path_segment() {
    let mut server = Server::new_async().await;
    let slash = server
        .mock("GET", "/api/quote/BRK%2FB")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"current_price": 412.5}"#)
        .create_async()
        .await;
    let question = server
        .mock("GET", "/api/quote/A%3FB")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"current_price": 7.0}"#)
        .create_async()
        .await;
    let wrong_route = server
        .mock("GET", Matcher::Regex(r"^/api/quote/(BRK/B|A)$".to_string()))
        .expect(0)
        .create_async()
        .await;

    let client = DashboardClient::new(&server.url());

    assert_eq!(client.current_price("BRK/B").await.unwrap(), 412.5);
    assert_eq!(client.current_price("A?B").await.unwrap(), 7.0);

    slash.assert_async().await;
    question.assert_async().await;
    wrong_route.assert_async().await;
}

#[tokio::test]
async fn test_add_holding_posts_raw_holding() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/portfolio/add")
        .match_body(Matcher::Json(serde_json::json!({
            "ticker": "NVDA",
            "sector": "Technology",
            "quantity": "4",
            "purchase_price": 480.5,
            "target_price": "600"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Holding added"}"#)
        .create_async()
        .await;

    let holding = RawHolding {
        ticker: "NVDA".to_string(),
        sector: "Technology".to_string(),
        quantity: RawNumber::Text("4".to_string()),
        purchase_price: RawNumber::Number(480.5),
        target_price: Some(RawNumber::Text("600".to_string())),
        stop_loss_price: None,
    };

    let client = DashboardClient::new(&server.url());
    let message = client.add_holding(&holding).await.unwrap();

    mock.assert_async().await;
    assert_eq!(message, "Holding added");
}

#[tokio::test]
async fn test_portfolio_accepts_numbers_and_strings() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/portfolio")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"portfolio": [
                {"ticker": "AAPL", "sector": "Technology", "quantity": 10, "purchase_price": "150.00", "target_price": "200"},
                {"ticker": "XOM", "sector": "Energy", "quantity": "5", "purchase_price": 100, "stop_loss_price": null}
            ]}"#,
        )
        .create_async()
        .await;

    let client = DashboardClient::new(&server.url());
    let holdings = client.portfolio().await.unwrap();

    assert_eq!(holdings.len(), 2);
    assert_eq!(holdings[0].quantity, RawNumber::Number(10.0));
    let aapl = holdings[0].validate().unwrap();
    assert_eq!(aapl.purchase_price, 150.0);
    assert_eq!(aapl.target_price, Some(200.0));
    let xom = holdings[1].validate().unwrap();
    assert_eq!(xom.quantity, 5.0);
    assert_eq!(xom.stop_loss_price, None);
}

#[tokio::test]
async fn test_remove_holding() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/portfolio/remove")
        .match_body(Matcher::Json(serde_json::json!({"ticker": "XOM"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Removed XOM"}"#)
        .create_async()
        .await;

    let client = DashboardClient::new(&server.url());
    let message = client.remove_holding("XOM").await.unwrap();

    mock.assert_async().await;
    assert_eq!(message, "Removed XOM");
}

#[tokio::test]
async fn test_compare() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/compare")
        .match_body(Matcher::Json(serde_json::json!({"tickers": ["AAPL", "MSFT"]})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "metrics": ["price", "pe_ratio"],
                "data": {
                    "AAPL": {"price": 180.0, "pe_ratio": null},
                    "MSFT": {"price": 410.5, "pe_ratio": 35.1}
                },
                "ranking": {"price": {"best": "MSFT", "worst": "AAPL"}}
            }"#,
        )
        .create_async()
        .await;

    let client = DashboardClient::new(&server.url());
    let tickers = vec!["AAPL".to_string(), "MSFT".to_string()];
    let report = client.compare(&tickers).await.unwrap();

    mock.assert_async().await;
    assert_eq!(report.value("MSFT", "price"), Some(&MetricValue::Number(410.5)));
    assert_eq!(report.value("AAPL", "pe_ratio"), None);
    assert_eq!(report.ranking["price"].worst, "AAPL");
}
