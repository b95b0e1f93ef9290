//! Sentiment Dashboard CLI
//!
//! Prints text views by default, or `ApiResponse` JSON with `--json`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sentiment_core::{ApiResponse, RawHolding, RawNumber};
use sentiment_dashboard::{holdings, views, Command, DashboardClient, DashboardConfig, Dispatcher};

#[derive(Parser)]
#[command(name = "sentiment-dashboard")]
#[command(about = "Stock sentiment and portfolio dashboard")]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score recent news for a ticker
    Analyze {
        /// Stock ticker
        ticker: String,
    },
    /// Show search history
    History {
        /// Page to show (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    /// Show or edit the wishlist
    Wishlist {
        #[command(subcommand)]
        action: Option<WishlistAction>,
    },
    /// Value the portfolio
    #[command(args_conflicts_with_subcommands = true)]
    Portfolio {
        /// Value holdings from a local JSON file instead of the backend
        #[arg(long)]
        holdings: Option<PathBuf>,

        #[command(subcommand)]
        action: Option<PortfolioAction>,
    },
    /// Compare fundamentals of two or more tickers
    Compare {
        #[arg(required = true, num_args = 2..)]
        tickers: Vec<String>,
    },
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Add a ticker
    Add { ticker: String },
}

#[derive(Subcommand)]
enum PortfolioAction {
    /// Add a holding
    Add {
        #[arg(short, long)]
        ticker: String,
        #[arg(short, long)]
        sector: String,
        /// Number of shares
        #[arg(short = 'n', long)]
        quantity: String,
        /// Cost per share
        #[arg(short, long)]
        purchase_price: String,
        #[arg(long)]
        target: Option<String>,
        #[arg(long)]
        stop_loss: Option<String>,
    },
    /// Remove a holding
    Remove { ticker: String },
}

/// Which view to print once the command has run
#[derive(Debug, Clone, Copy)]
enum View {
    News,
    History,
    Wishlist,
    Portfolio,
    Comparison,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            if json {
                match serde_json::to_string_pretty(&ApiResponse::<()>::err(format!("{:#}", e))) {
                    Ok(body) => println!("{}", body),
                    Err(_) => eprintln!("Error: {:#}", e),
                }
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String> {
    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }
    tracing::info!("Using backend {}", config.base_url);

    let client = DashboardClient::with_timeout(&config.base_url, config.request_timeout())
        .context("Failed to build HTTP client")?;
    let mut dispatcher = Dispatcher::new(client, config);

    let view = execute(&mut dispatcher, cli.command).await?;

    if cli.json {
        render_json(&dispatcher, view)
    } else {
        Ok(render_text(&dispatcher, view))
    }
}

async fn execute(dispatcher: &mut Dispatcher, command: Commands) -> Result<View> {
    let view = match command {
        Commands::Analyze { ticker } => {
            dispatcher.dispatch(Command::AnalyzeSentiment { ticker }).await?;
            View::News
        }
        Commands::History { page } => {
            dispatcher.dispatch(Command::LoadHistory { page }).await?;
            View::History
        }
        Commands::Wishlist { action } => {
            let command = match action {
                Some(WishlistAction::Add { ticker }) => Command::AddToWishlist { ticker },
                None => Command::LoadWishlist,
            };
            dispatcher.dispatch(command).await?;
            View::Wishlist
        }
        Commands::Portfolio { holdings, action } => {
            match action {
                Some(PortfolioAction::Add {
                    ticker,
                    sector,
                    quantity,
                    purchase_price,
                    target,
                    stop_loss,
                }) => {
                    let holding = RawHolding {
                        ticker,
                        sector,
                        quantity: RawNumber::Text(quantity),
                        purchase_price: RawNumber::Text(purchase_price),
                        target_price: target.map(RawNumber::Text),
                        stop_loss_price: stop_loss.map(RawNumber::Text),
                    };
                    dispatcher.dispatch(Command::AddHolding(holding)).await?;
                }
                Some(PortfolioAction::Remove { ticker }) => {
                    dispatcher.dispatch(Command::RemoveHolding { ticker }).await?;
                }
                None => match holdings {
                    Some(path) => {
                        let raw = holdings::load_from_path(&path)?;
                        dispatcher.set_holdings(raw).await;
                    }
                    None => dispatcher.dispatch(Command::LoadPortfolio).await?,
                },
            }
            View::Portfolio
        }
        Commands::Compare { tickers } => {
            dispatcher.dispatch(Command::Compare { tickers }).await?;
            View::Comparison
        }
    };
    Ok(view)
}

fn render_text(dispatcher: &Dispatcher, view: View) -> String {
    let state = dispatcher.state();
    let mut out = String::new();

    if let Some(notice) = &state.notice {
        out.push_str(notice);
        out.push_str("\n\n");
    }

    match view {
        View::News => {
            if let (Some(ticker), Some(news)) = (&state.ticker, &state.news) {
                out.push_str(&views::news::render(ticker, news, state.in_wishlist));
            }
        }
        View::History => {
            let page = state.history_page(dispatcher.config().history_page_size);
            out.push_str(&views::history::render(&page, state.history_error.as_deref()));
        }
        View::Wishlist => {
            out.push_str(&views::wishlist::render(
                &state.wishlist,
                state.wishlist_error.as_deref(),
            ));
        }
        View::Portfolio => {
            if let Some(valuation) = &state.valuation {
                out.push_str(&views::portfolio::render(valuation));
            }
            if let Some(chart) = dispatcher.sector_chart().current() {
                out.push('\n');
                out.push_str(&chart.text);
            }
        }
        View::Comparison => {
            if let Some(comparison) = &state.comparison {
                out.push_str(&views::compare::render(comparison));
            }
        }
    }
    out.trim_end().to_string()
}

fn render_json(dispatcher: &Dispatcher, view: View) -> Result<String> {
    let state = dispatcher.state();
    let data = match view {
        View::News => json!({
            "ticker": state.ticker,
            "news": state.news,
            "in_wishlist": state.in_wishlist,
        }),
        View::History => {
            let page = state.history_page(dispatcher.config().history_page_size);
            serde_json::to_value(page)?
        }
        View::Wishlist => json!({
            "wishlist": state.wishlist,
            "notice": state.notice,
        }),
        View::Portfolio => json!({
            "valuation": state.valuation,
            "notice": state.notice,
        }),
        View::Comparison => json!({
            "tickers": state.comparison.as_ref().map(|c| &c.tickers),
            "report": state.comparison.as_ref().map(|c| &c.report),
        }),
    };
    Ok(serde_json::to_string_pretty(&ApiResponse::ok(data))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_holdings_file_conflicts_with_portfolio_actions() {
        let result = Cli::try_parse_from([
            "sentiment-dashboard",
            "portfolio",
            "--holdings",
            "holdings.json",
            "remove",
            "AAPL",
        ]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "sentiment-dashboard",
            "portfolio",
            "--holdings",
            "holdings.json",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Portfolio {
                holdings: Some(_),
                action: None
            }
        ));
    }

    #[test]
    fn test_portfolio_add_and_global_flags() {
        let cli = Cli::try_parse_from([
            "sentiment-dashboard",
            "portfolio",
            "add",
            "-t",
            "aapl",
            "-s",
            "Technology",
            "-n",
            "10",
            "-p",
            "150",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Portfolio {
                action: Some(PortfolioAction::Add { ticker, quantity, .. }),
                ..
            } => {
                assert_eq!(ticker, "aapl");
                assert_eq!(quantity, "10");
            }
            _ => panic!("expected portfolio add"),
        }
    }

    #[test]
    fn test_compare_needs_two_tickers() {
        assert!(Cli::try_parse_from(["sentiment-dashboard", "compare", "AAPL"]).is_err());
    }
}
