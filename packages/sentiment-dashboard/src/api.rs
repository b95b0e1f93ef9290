//! HTTP client for the dashboard backend API
//!
//! Provides async methods for the news, history, wishlist, portfolio, quote
//! and comparison endpoints.

pub mod client;
pub mod types;

pub use client::*;
