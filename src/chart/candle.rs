use serde::Serialize;

use crate::chart::scale::{Band, LinearScale};
use crate::chart::{Line, Palette, Rect, Trend};
use crate::data::OHLCVData;

/// Minimum pixel height of a candle body so doji candles stay visible.
const MIN_BODY_HEIGHT: f64 = 1.0;

/// Wick + body of one point, already in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candlestick {
    pub index: usize,
    pub date: String,
    pub trend: Trend,
    pub wick: Line,
    pub body: Rect,
    pub fill: String,
    pub stroke: String,
}

/// Candles for a whole series. Points that could not be drawn are listed by index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleSeries {
    pub candles: Vec<Candlestick>,
    pub skipped: Vec<usize>,
}

/// Builds the candle for `point` placed in the slot `[x, x + width)`.
///
/// Returns `None` instead of failing when a price is missing or non-finite,
/// the slot is unusable, or the scale is degenerate.
pub fn build_candlestick(
    index: usize,
    point: &OHLCVData,
    x: f64,
    width: f64,
    scale: &LinearScale,
    body_ratio: f64,
    palette: &Palette,
) -> Option<Candlestick> {
    let (open, high, low, close) = point.finite_ohlc()?;
    if !x.is_finite() || !width.is_finite() || width <= 0.0 || !scale.is_monotonic() {
        return None;
    }

    let y_open = scale.map(open);
    let y_close = scale.map(close);
    let y_high = scale.map(high);
    let y_low = scale.map(low);

    let wick_x = x + width / 2.0;
    let body_width = width * body_ratio;
    let body_x = x + (width - body_width) / 2.0;
    let body_top = y_open.min(y_close);
    let body_height = (y_open - y_close).abs().max(MIN_BODY_HEIGHT);

    let trend = Trend::of(open, close);

    Some(Candlestick {
        index,
        date: point.date.clone(),
        trend,
        wick: Line {
            x1: wick_x,
            y1: y_high,
            x2: wick_x,
            y2: y_low,
        },
        body: Rect {
            x: body_x,
            y: body_top,
            width: body_width,
            height: body_height,
        },
        fill: palette.trend_color(trend).to_string(),
        stroke: palette.wick.clone(),
    })
}

/// Applies [`build_candlestick`] to every point; one bad day never blanks the rest.
pub fn build_series(
    series: &[OHLCVData],
    band: &Band,
    scale: &LinearScale,
    body_ratio: f64,
    palette: &Palette,
) -> CandleSeries {
    let mut candles = Vec::with_capacity(series.len());
    let mut skipped = Vec::new();

    for (index, point) in series.iter().enumerate() {
        let (x, width) = band.slot(index);
        match build_candlestick(index, point, x, width, scale, body_ratio, palette) {
            Some(candle) => candles.push(candle),
            None => {
                tracing::debug!(index, date = %point.date, "skipping candle with unusable prices");
                skipped.push(index);
            }
        }
    }

    CandleSeries { candles, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Domain;
    use crate::data::fixtures::point;

    fn scale() -> LinearScale {
        LinearScale::vertical(Domain { min: 90.0, max: 110.0 }, 0.0, 200.0)
    }

    fn build(point: &OHLCVData) -> Option<Candlestick> {
        build_candlestick(0, point, 10.0, 20.0, &scale(), 0.7, &Palette::default())
    }

    #[test]
    fn rising_candle_is_bullish() {
        let candle = build(&point("2024-01-01", 100.0, 106.0, 99.0, 105.0)).unwrap();
        assert_eq!(candle.trend, Trend::Bullish);
        assert_eq!(candle.fill, Palette::default().bullish);
    }

    #[test]
    fn falling_candle_is_bearish() {
        let candle = build(&point("2024-01-01", 105.0, 106.0, 99.0, 100.0)).unwrap();
        assert_eq!(candle.trend, Trend::Bearish);
        assert_eq!(candle.fill, Palette::default().bearish);
    }

    #[test]
    fn tie_counts_as_bullish() {
        let candle = build(&point("2024-01-01", 100.0, 101.0, 99.0, 100.0)).unwrap();
        assert_eq!(candle.trend, Trend::Bullish);
    }

    #[test]
    fn geometry_in_pixel_space() {
        // 10 px per price unit, top of panel is price 110
        let candle = build(&point("2024-01-01", 100.0, 106.0, 95.0, 104.0)).unwrap();

        assert_eq!(candle.wick.x1, 20.0);
        assert_eq!(candle.wick.x2, 20.0);
        assert!((candle.wick.y1 - 40.0).abs() < 1e-9);
        assert!((candle.wick.y2 - 150.0).abs() < 1e-9);

        assert!((candle.body.width - 14.0).abs() < 1e-9);
        assert!((candle.body.x - 13.0).abs() < 1e-9);
        assert!((candle.body.y - 60.0).abs() < 1e-9);
        assert!((candle.body.height - 40.0).abs() < 1e-9);
    }

    #[test]
    fn doji_keeps_one_pixel_body() {
        let candle = build(&point("2024-01-01", 100.0, 101.0, 99.0, 100.0)).unwrap();
        assert_eq!(candle.body.height, 1.0);

        let almost = build(&point("2024-01-01", 100.0, 101.0, 99.0, 100.01)).unwrap();
        assert_eq!(almost.body.height, 1.0);
    }

    #[test]
    fn rejects_bad_inputs() {
        let mut nan_open = point("2024-01-01", 100.0, 101.0, 99.0, 100.0);
        nan_open.open = Some(f64::NAN);
        assert!(build(&nan_open).is_none());

        let mut missing_low = point("2024-01-01", 100.0, 101.0, 99.0, 100.0);
        missing_low.low = None;
        assert!(build(&missing_low).is_none());

        let ok = point("2024-01-01", 100.0, 101.0, 99.0, 100.0);
        let palette = Palette::default();
        assert!(build_candlestick(0, &ok, 0.0, 0.0, &scale(), 0.7, &palette).is_none());
        assert!(build_candlestick(0, &ok, f64::NAN, 5.0, &scale(), 0.7, &palette).is_none());

        let flat = LinearScale::vertical(Domain { min: 1.0, max: 1.0 }, 0.0, 100.0);
        assert!(build_candlestick(0, &ok, 0.0, 5.0, &flat, 0.7, &palette).is_none());
    }

    #[test]
    fn corrupt_point_is_isolated() {
        let mut series: Vec<OHLCVData> = (0..10)
            .map(|i| point(&format!("2024-01-{:02}", i + 1), 100.0, 105.0, 95.0, 102.0))
            .collect();
        series[5].open = Some(f64::NAN);

        let band = Band::new(0.0, 200.0, series.len());
        let result = build_series(&series, &band, &scale(), 0.7, &Palette::default());

        assert_eq!(result.candles.len(), 9);
        assert_eq!(result.skipped, vec![5]);
        assert!(result.candles.iter().all(|c| c.index != 5));
    }
}
