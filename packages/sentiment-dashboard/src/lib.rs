//! Sentiment Dashboard - client for the stock sentiment and portfolio API.
//!
//! - **api**: HTTP client for the backend endpoints
//! - **dispatch**: commands and the dispatcher that applies them
//! - **state**: everything the views display
//! - **views**: text rendering, including the sector chart slot
//! - **config**: TOML configuration

pub mod api;
pub mod config;
pub mod dispatch;
pub mod holdings;
pub mod state;
pub mod views;

pub use api::{ApiError, DashboardClient};
pub use config::{ConfigError, DashboardConfig};
pub use dispatch::{Command, Dispatcher};
pub use state::DashboardState;
