use serde::Serialize;

use crate::chart::scale::{Band, LinearScale};
use crate::chart::Palette;
use crate::data::{OHLCVData, SignalEvent, SignalType};

/// A series point together with the signal (if any) that landed on its date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedPoint<'a> {
    #[serde(flatten)]
    pub point: &'a OHLCVData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<&'a SignalEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerIcon {
    ArrowUp,
    ArrowDown,
    Minus,
}

impl From<SignalType> for MarkerIcon {
    fn from(kind: SignalType) -> Self {
        match kind {
            SignalType::Buy => MarkerIcon::ArrowUp,
            SignalType::Sell => MarkerIcon::ArrowDown,
            SignalType::Hold => MarkerIcon::Minus,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub index: usize,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: SignalType,
    pub price: f64,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: String,
    pub icon: MarkerIcon,
}

/// Attaches to each point the first event whose date matches exactly.
pub fn merge_events<'a>(series: &'a [OHLCVData], events: &'a [SignalEvent]) -> Vec<MergedPoint<'a>> {
    series
        .iter()
        .map(|point| MergedPoint {
            point,
            event: events.iter().find(|event| event.date == point.date),
        })
        .collect()
}

/// Looks up the merged point for `date`, if the series has one.
pub fn find_point<'a>(merged: &'a [MergedPoint<'a>], date: &str) -> Option<&'a MergedPoint<'a>> {
    merged.iter().find(|m| m.point.date == date)
}

/// One marker per event whose date exists in the series and whose price is finite.
pub fn place_markers(
    series: &[OHLCVData],
    events: &[SignalEvent],
    band: &Band,
    scale: &LinearScale,
    radius: f64,
    palette: &Palette,
) -> Vec<Marker> {
    events
        .iter()
        .filter_map(|event| {
            let Some(index) = series.iter().position(|p| p.date == event.date) else {
                tracing::debug!(date = %event.date, "signal event has no matching point");
                return None;
            };
            if !event.price.is_finite() {
                tracing::debug!(date = %event.date, "signal event price is not finite");
                return None;
            }

            Some(Marker {
                index,
                date: event.date.clone(),
                kind: event.kind,
                price: event.price,
                cx: band.center(index),
                cy: scale.map(event.price),
                radius,
                fill: palette.signal_color(event.kind).to_string(),
                icon: event.kind.into(),
            })
        })
        .collect()
}
