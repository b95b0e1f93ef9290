//! Dashboard configuration
//!
//! Settings are read from a TOML file. Every field has a default, so a
//! missing file or a partial file is fine.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sentiment_core::{OverflowPolicy, Palette};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Sector chart settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ChartConfig {
    pub palette: Palette,
    pub overflow: OverflowPolicy,
}

/// Dashboard settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Backend base URL
    pub base_url: String,
    /// Timeout for every backend request
    pub request_timeout_secs: u64,
    /// Timeout for each quote in a valuation pass, 0 disables it
    pub quote_timeout_ms: u64,
    /// Rows per history page
    pub history_page_size: usize,
    pub chart: ChartConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
            quote_timeout_ms: 5_000,
            history_page_size: 10,
            chart: ChartConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Get the default config file path.
    ///
    /// Default path: `<config dir>/sentiment-dashboard/config.toml`
    /// Can be overridden with `SENTIMENT_DASHBOARD_CONFIG` environment variable.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var("SENTIMENT_DASHBOARD_CONFIG") {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("sentiment-dashboard/config.toml"))
            .unwrap_or_else(|| PathBuf::from("sentiment-dashboard.toml"))
    }

    /// Load from `path`, or from the default path when `None`.
    ///
    /// `SENTIMENT_DASHBOARD_URL` overrides the configured base URL.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);
        let mut config = Self::load_from_path(&path)?;

        if let Ok(url) = env::var("SENTIMENT_DASHBOARD_URL") {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }

        Ok(config)
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn quote_timeout(&self) -> Option<Duration> {
        (self.quote_timeout_ms > 0).then(|| Duration::from_millis(self.quote_timeout_ms))
    }
}
