//! Sector pie chart model.
//!
//! Turns sector totals into proportional slices and assigns each slice a
//! palette color. When there are more sectors than colors the
//! [`OverflowPolicy`] decides whether colors repeat or the smallest sectors
//! are merged into a single "Other" slice.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Label used for the merged slice under [`OverflowPolicy::OtherBucket`].
pub const OTHER_LABEL: &str = "Other";

/// Default twelve-color palette.
pub const DEFAULT_PALETTE: [&str; 12] = [
    "#4F46E5", "#10B981", "#F59E0B", "#EF4444", "#3B82F6", "#8B5CF6", "#EC4899", "#14B8A6",
    "#F97316", "#84CC16", "#06B6D4", "#6B7280",
];

/// What to do when there are more sectors than palette colors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Cycle through the palette again
    #[default]
    Wrap,
    /// Keep the largest sectors and merge the rest into "Other"
    #[serde(alias = "other")]
    OtherBucket,
}

/// Ordered list of slice colors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Palette(Vec<String>);

impl Palette {
    /// Build a palette from colors. An empty list falls back to the default.
    pub fn new(colors: Vec<String>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self(colors)
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Color for the slice at `index`, wrapping past the end.
    pub fn color(&self, index: usize) -> &str {
        &self.0[index % self.0.len()]
    }

    pub fn colors(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for Palette {
    fn from(colors: Vec<String>) -> Self {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<String> {
    fn from(palette: Palette) -> Self {
        palette.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect())
    }
}

/// One slice of the sector pie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Fraction of the whole, in `[0, 1]`
    pub share: f64,
    pub color: String,
}

/// Proportional view of sector totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SectorChart {
    pub slices: Vec<PieSlice>,
    pub total: f64,
}

impl SectorChart {
    /// Build a chart from sector totals.
    ///
    /// Slices are ordered by value, largest first, ties broken by label.
    /// Non-positive totals produce an empty chart.
    pub fn from_totals(
        totals: &BTreeMap<String, f64>,
        palette: &Palette,
        policy: OverflowPolicy,
    ) -> Self {
        let mut entries: Vec<(String, f64)> = totals
            .iter()
            .filter(|(_, value)| value.is_finite() && **value > 0.0)
            .map(|(label, value)| (label.clone(), *value))
            .collect();

        let total: f64 = entries.iter().map(|(_, value)| value).sum();
        if entries.is_empty() || total <= 0.0 {
            return Self::default();
        }

        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        if policy == OverflowPolicy::OtherBucket && entries.len() > palette.len() {
            let keep = palette.len().saturating_sub(1);
            let rest: f64 = entries[keep..].iter().map(|(_, value)| value).sum();
            entries.truncate(keep);
            entries.push((OTHER_LABEL.to_string(), rest));
        }

        let slices = entries
            .into_iter()
            .enumerate()
            .map(|(index, (label, value))| PieSlice {
                label,
                value,
                share: value / total,
                color: palette.color(index).to_string(),
            })
            .collect();

        Self { slices, total }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}
