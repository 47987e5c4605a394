use serde::{Deserialize, Serialize};

use crate::chart::tooltip::Locale;
use crate::data::SignalType;

pub mod candle;
pub mod domain;
pub mod format;
pub mod overlay;
pub mod scale;
pub mod svg;
pub mod tick;
pub mod tooltip;

/// Closed numeric range mapped onto an axis. Always `min < max` once computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
}

impl Trend {
    /// A tie counts as bullish.
    pub fn of(open: f64, close: f64) -> Self {
        if close >= open {
            Trend::Bullish
        } else {
            Trend::Bearish
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub bullish: String,
    pub bearish: String,
    pub neutral: String,
    pub wick: String,
    pub volume: String,
    pub grid: String,
    pub text: String,
    pub background: String,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            bullish: "#26a69a".to_string(),
            bearish: "#ef5350".to_string(),
            neutral: "#f5b041".to_string(),
            wick: "#37474f".to_string(),
            volume: "#7e57c2".to_string(),
            grid: "#e0e0e0".to_string(),
            text: "#757575".to_string(),
            background: "#ffffff".to_string(),
        }
    }
}

impl Palette {
    pub fn trend_color(&self, trend: Trend) -> &str {
        match trend {
            Trend::Bullish => &self.bullish,
            Trend::Bearish => &self.bearish,
        }
    }

    pub fn signal_color(&self, kind: SignalType) -> &str {
        match kind {
            SignalType::Buy => &self.bullish,
            SignalType::Sell => &self.bearish,
            SignalType::Hold => &self.neutral,
        }
    }
}

/// Tunables for a chart render.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub width: f64,
    pub height: f64,
    /// Fraction of the raw price range added above and below.
    pub price_padding: f64,
    /// Multiplier applied to the largest volume.
    pub volume_headroom: f64,
    /// Body width as a fraction of the slot width.
    pub body_ratio: f64,
    pub tick_target: usize,
    pub marker_radius: f64,
    /// Share of the height given to the price panel when a volume panel is shown.
    pub price_panel_ratio: f64,
    pub locale: Locale,
    pub palette: Palette,
}

impl Default for ChartSettings {
    fn default() -> Self {
        ChartSettings {
            width: 960.0,
            height: 450.0,
            price_padding: 0.10,
            volume_headroom: 1.5,
            body_ratio: 0.7,
            tick_target: 10,
            marker_radius: 8.0,
            price_panel_ratio: 0.7,
            locale: Locale::En,
            palette: Palette::default(),
        }
    }
}

impl ChartSettings {
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_rule() {
        assert_eq!(Trend::of(100.0, 105.0), Trend::Bullish);
        assert_eq!(Trend::of(105.0, 100.0), Trend::Bearish);
        assert_eq!(Trend::of(100.0, 100.0), Trend::Bullish);
    }

    #[test]
    fn signal_colors_follow_trend_colors() {
        let palette = Palette::default();
        assert_eq!(palette.signal_color(SignalType::Buy), palette.trend_color(Trend::Bullish));
        assert_eq!(palette.signal_color(SignalType::Sell), palette.trend_color(Trend::Bearish));
        assert_eq!(palette.signal_color(SignalType::Hold), palette.neutral);
    }
}
