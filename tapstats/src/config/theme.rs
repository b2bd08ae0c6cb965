use ratatui::{style::Color, symbols::Marker};
use serde::{Deserialize, Serialize};

/// General theme
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Theme {
    pub text: TextTheme,
    pub plot: PlotTheme,
}

/// Text color theme
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct TextTheme {
    pub highlight: Color,
    pub error: Color,
    pub dim: Color,
}

impl Default for TextTheme {
    fn default() -> Self {
        Self {
            highlight: Color::Blue,
            error: Color::Red,
            dim: Color::DarkGray,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum PlotSymbol {
    Dot,
    Block,
    HalfBlock,
    Braille,
    Bar,
}

impl PlotSymbol {
    /// Returns the marker that the symbol corresponds to.
    ///
    /// This doesn't use the `From` trait, as we can't make that a const fn
    pub const fn as_marker(self) -> Marker {
        match self {
            Self::Dot => Marker::Dot,
            Self::Bar => Marker::Bar,
            Self::Block => Marker::Block,
            Self::Braille => Marker::Braille,
            Self::HalfBlock => Marker::HalfBlock,
        }
    }
}

/// Plot color and symbol theme
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct PlotTheme {
    /// Raw speed series
    pub speed: Color,
    /// Smoothed speed series
    pub smoothed: Color,
    pub accuracy: Color,
    /// Bars in the per-key charts
    pub bar: Color,
    /// Transition heatmap ramp, low to high
    pub heat: Vec<Color>,
    pub line_symbol: PlotSymbol,
}

impl Default for PlotTheme {
    fn default() -> Self {
        Self {
            speed: Color::Gray,
            smoothed: Color::Yellow,
            accuracy: Color::Green,
            bar: Color::Blue,
            heat: vec![
                Color::Rgb(28, 32, 48),
                Color::Rgb(37, 66, 110),
                Color::Rgb(52, 104, 160),
                Color::Rgb(86, 148, 202),
                Color::Rgb(158, 202, 236),
            ],
            line_symbol: PlotSymbol::HalfBlock,
        }
    }
}

impl PlotTheme {
    /// Picks a heatmap color for a value normalized into `0.0..=1.0`.
    /// Returns `None` when the ramp is configured empty.
    pub fn heat_color(&self, normalized: f64) -> Option<Color> {
        if self.heat.is_empty() {
            return None;
        }
        let last = self.heat.len() - 1;
        let step = (normalized.clamp(0.0, 1.0) * last as f64).round() as usize;
        Some(self.heat[step.min(last)])
    }
}
