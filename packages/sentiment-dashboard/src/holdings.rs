//! Local holdings files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use sentiment_core::RawHolding;

#[derive(Deserialize)]
struct HoldingsFile {
    #[serde(default)]
    portfolio: Vec<RawHolding>,
}

/// Load holdings from a JSON file.
///
/// Accepts either a bare array of holdings or the `/api/portfolio` envelope
/// `{ "portfolio": [...] }`.
pub fn load_from_path(path: &Path) -> Result<Vec<RawHolding>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read holdings file {}", path.display()))?;
    let data: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Holdings file {} is not valid JSON", path.display()))?;

    if data.is_array() {
        return Ok(serde_json::from_value(data)?);
    }

    let file: HoldingsFile = serde_json::from_value(data)?;
    Ok(file.portfolio)
}
