use crate::chart::candle::{build_series, Candlestick};
use crate::chart::domain::{price_domain, volume_domain};
use crate::chart::format::{format_date_label, format_price, format_volume};
use crate::chart::overlay::{place_markers, Marker};
use crate::chart::scale::{Band, LinearScale};
use crate::chart::tick::{label_indices, tick_interval, value_ticks};
use crate::chart::{ChartSettings, Domain, Palette, Rect};
use crate::data::{OHLCVData, SignalEvent};
use crate::error::ChartError;
use serde::Serialize;

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 10.0;
const X_AXIS_HEIGHT: f64 = 40.0;
const VOLUME_AXIS_HEIGHT: f64 = 20.0;
const Y_TICK_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    pub value: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XLabel {
    pub index: usize,
    pub x: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePanel {
    pub frame: Rect,
    pub domain: Domain,
    pub scale: LinearScale,
    pub ticks: Vec<AxisTick>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeBar {
    pub index: usize,
    pub date: String,
    pub rect: Rect,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumePanel {
    pub frame: Rect,
    pub domain: Domain,
    pub scale: LinearScale,
    pub ticks: Vec<AxisTick>,
    pub bars: Vec<VolumeBar>,
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub point_count: usize,
    pub tick_interval: usize,
    pub band: Band,
    pub price: PricePanel,
    pub volume: Option<VolumePanel>,
    pub candles: Vec<Candlestick>,
    pub skipped: Vec<usize>,
    pub markers: Vec<Marker>,
    pub x_labels: Vec<XLabel>,
    pub palette: Palette,
}

pub struct Engine {
    pub settings: ChartSettings,
}

impl Engine {
    pub fn new(settings: ChartSettings) -> Self {
        Engine { settings }
    }

    pub fn run(
        &self,
        series: &[OHLCVData],
        events: &[SignalEvent],
    ) -> Result<ChartLayout, ChartError> {
        let settings = &self.settings;

        if series.len() < 2 {
            return Err(ChartError::InsufficientData { len: series.len() });
        }

        let price_domain = price_domain(series, settings.price_padding)?;
        let volume_domain = volume_domain(series, settings.volume_headroom);

        let (price_frame, volume_frame) = self.frames(volume_domain.is_some())?;

        let band = Band::new(price_frame.x, price_frame.width, series.len());
        let price_scale = LinearScale::vertical(price_domain, price_frame.y, price_frame.height);

        let candle_series = build_series(
            series,
            &band,
            &price_scale,
            settings.body_ratio,
            &settings.palette,
        );
        if !candle_series.skipped.is_empty() {
            tracing::debug!(
                skipped = candle_series.skipped.len(),
                total = series.len(),
                "some candles could not be drawn"
            );
        }

        let markers = place_markers(
            series,
            events,
            &band,
            &price_scale,
            settings.marker_radius,
            &settings.palette,
        );

        let interval = tick_interval(series.len(), settings.tick_target);
        let x_labels = label_indices(series.len(), interval)
            .into_iter()
            .map(|index| XLabel {
                index,
                x: band.center(index),
                text: format_date_label(&series[index].date),
            })
            .collect();

        let volume = match (volume_domain, volume_frame) {
            (Some(domain), Some(frame)) => Some(self.volume_panel(series, domain, frame, &band)),
            _ => None,
        };

        tracing::debug!(
            points = series.len(),
            events = events.len(),
            markers = markers.len(),
            y_min = price_domain.min,
            y_max = price_domain.max,
            interval,
            "chart layout computed"
        );

        Ok(ChartLayout {
            width: settings.width,
            height: settings.height,
            point_count: series.len(),
            tick_interval: interval,
            band,
            price: PricePanel {
                frame: price_frame,
                domain: price_domain,
                scale: price_scale,
                ticks: axis_ticks(price_domain, &price_scale, format_price),
            },
            volume,
            candles: candle_series.candles,
            skipped: candle_series.skipped,
            markers,
            x_labels,
            palette: settings.palette.clone(),
        })
    }

    /// Plot frames for the price panel and, when shown, the volume panel below it.
    fn frames(&self, with_volume: bool) -> Result<(Rect, Option<Rect>), ChartError> {
        let ChartSettings { width, height, .. } = self.settings;
        let invalid = ChartError::InvalidDimensions { width, height };

        if !width.is_finite() || !height.is_finite() {
            return Err(invalid);
        }

        let plot_width = width - MARGIN_LEFT - MARGIN_RIGHT;
        let price_area = if with_volume {
            height * self.settings.price_panel_ratio
        } else {
            height
        };

        let price_frame = Rect {
            x: MARGIN_LEFT,
            y: MARGIN_TOP,
            width: plot_width,
            height: price_area - MARGIN_TOP - X_AXIS_HEIGHT,
        };

        let volume_frame = with_volume.then(|| Rect {
            x: MARGIN_LEFT,
            y: price_area + MARGIN_TOP,
            width: plot_width,
            height: height - price_area - MARGIN_TOP - VOLUME_AXIS_HEIGHT,
        });

        let usable = |r: &Rect| r.width > 0.0 && r.height > 0.0;
        if !usable(&price_frame) || volume_frame.as_ref().is_some_and(|r| !usable(r)) {
            return Err(invalid);
        }

        Ok((price_frame, volume_frame))
    }

    fn volume_panel(
        &self,
        series: &[OHLCVData],
        domain: Domain,
        frame: Rect,
        band: &Band,
    ) -> VolumePanel {
        let scale = LinearScale::vertical(domain, frame.y, frame.height);
        let baseline = frame.y + frame.height;

        let bars = series
            .iter()
            .enumerate()
            .filter_map(|(index, point)| {
                let volume = point.finite_volume().filter(|v| *v >= 0.0)?;
                let (x, slot_width) = band.slot(index);
                let bar_width = slot_width * self.settings.body_ratio;
                let top = scale.map(volume);
                Some(VolumeBar {
                    index,
                    date: point.date.clone(),
                    rect: Rect {
                        x: x + (slot_width - bar_width) / 2.0,
                        y: top,
                        width: bar_width,
                        height: baseline - top,
                    },
                    fill: self.settings.palette.volume.clone(),
                })
            })
            .collect();

        VolumePanel {
            frame,
            domain,
            scale,
            ticks: axis_ticks(domain, &scale, format_volume),
            bars,
        }
    }
}

fn axis_ticks(domain: Domain, scale: &LinearScale, format: fn(f64) -> String) -> Vec<AxisTick> {
    value_ticks(domain, Y_TICK_COUNT)
        .into_iter()
        .map(|value| AxisTick {
            value,
            y: scale.map(value),
            label: format(value),
        })
        .collect()
}
