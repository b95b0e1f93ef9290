//! Sector chart rendering
//!
//! A [`ChartSlot`] owns at most one rendered chart. Rendering into an
//! occupied slot releases the old chart before the new one is drawn, so
//! repeated refreshes never stack charts on top of each other.

use sentiment_core::SectorChart;

/// Something that can draw a sector chart and later release it.
pub trait ChartRenderer {
    type Handle;

    fn draw(&mut self, chart: &SectorChart) -> Self::Handle;
    fn release(&mut self, handle: Self::Handle);
}

/// A named visual location holding at most one chart.
pub struct ChartSlot<R: ChartRenderer> {
    name: String,
    renderer: R,
    current: Option<R::Handle>,
}

impl<R: ChartRenderer> ChartSlot<R> {
    pub fn new(name: impl Into<String>, renderer: R) -> Self {
        Self {
            name: name.into(),
            renderer,
            current: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace whatever is in the slot with a drawing of `chart`.
    pub fn render(&mut self, chart: &SectorChart) -> &R::Handle {
        self.clear();
        tracing::debug!("Drawing {} slices into chart slot {}", chart.slices.len(), self.name);
        self.current.insert(self.renderer.draw(chart))
    }

    /// Release the current chart, if any.
    pub fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            tracing::trace!("Releasing chart in slot {}", self.name);
            self.renderer.release(previous);
        }
    }

    pub fn current(&self) -> Option<&R::Handle> {
        self.current.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

/// A chart drawn as text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextChart {
    pub id: u64,
    pub text: String,
}

/// Draws proportional horizontal bars.
#[derive(Debug, Clone)]
pub struct TextChartRenderer {
    width: usize,
    next_id: u64,
    live: usize,
}

impl TextChartRenderer {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            next_id: 1,
            live: 0,
        }
    }

    /// Charts drawn and not yet released.
    pub fn live_charts(&self) -> usize {
        self.live
    }
}

impl Default for TextChartRenderer {
    fn default() -> Self {
        Self::new(40)
    }
}

impl ChartRenderer for TextChartRenderer {
    type Handle = TextChart;

    fn draw(&mut self, chart: &SectorChart) -> TextChart {
        let id = self.next_id;
        self.next_id += 1;
        self.live += 1;

        if chart.is_empty() {
            return TextChart {
                id,
                text: "No sector data to chart.\n".to_string(),
            };
        }

        let label_width = chart
            .slices
            .iter()
            .map(|s| s.label.chars().count())
            .max()
            .unwrap_or(0);

        let mut text = String::new();
        for slice in &chart.slices {
            let bar_len = (slice.share * self.width as f64).round() as usize;
            text.push_str(&format!(
                "{:<label_width$}  {:<width$}  {:>6.2}%  {}\n",
                slice.label,
                "#".repeat(bar_len),
                slice.share * 100.0,
                slice.color,
                label_width = label_width,
                width = self.width,
            ));
        }
        TextChart { id, text }
    }

    fn release(&mut self, _handle: TextChart) {
        self.live = self.live.saturating_sub(1);
    }
}
