use crate::chart::Domain;
use crate::data::OHLCVData;
use crate::error::ChartError;

/// Relative expansion applied to each side of a flat series.
const FLAT_SPREAD_RATIO: f64 = 0.10;

/// Padded price domain built from every finite `high` and `low`.
///
/// `padding` is the fraction of the raw range added above and below.
/// Fails only when the series has no finite high/low at all.
pub fn price_domain(series: &[OHLCVData], padding: f64) -> Result<Domain, ChartError> {
    let candidates: Vec<f64> = series
        .iter()
        .flat_map(|point| [point.high, point.low])
        .flatten()
        .filter(|value| value.is_finite())
        .collect();

    if candidates.is_empty() {
        return Err(ChartError::NoPlottableData);
    }

    let raw_min = candidates.iter().copied().fold(f64::INFINITY, f64::min);
    let raw_max = candidates.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let padded = if raw_min == raw_max {
        let spread = f64::max(1.0, (raw_min * FLAT_SPREAD_RATIO).abs());
        (raw_min - spread, raw_max + spread)
    } else {
        // scaled before subtracting so extreme bounds cannot overflow the range
        let pad = raw_max * padding - raw_min * padding;
        (raw_min - pad, raw_max + pad)
    };

    let (mut min, max) = if padded.0.is_finite() && padded.1.is_finite() {
        padded
    } else {
        tracing::debug!(raw_min, raw_max, "padded price domain overflowed, using raw bounds");
        (raw_min, raw_max)
    };

    if raw_min >= 0.0 {
        min = min.max(0.0);
    }

    let (min, max) = ordered(min, max);
    Ok(Domain { min, max })
}

/// Volume domain `[0, max * headroom]`, or `None` when no point has a finite volume.
pub fn volume_domain(series: &[OHLCVData], headroom: f64) -> Option<Domain> {
    let observed_max = series
        .iter()
        .filter_map(OHLCVData::finite_volume)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))?;

    let scaled = observed_max * headroom;
    let max = if scaled.is_finite() { scaled } else { observed_max };

    let (min, max) = ordered(0.0, max);
    Some(Domain { min, max })
}

/// Widens a collapsed range so that `min < max` with both ends finite.
fn ordered(min: f64, max: f64) -> (f64, f64) {
    if min < max {
        return (min, max);
    }
    let step = f64::max(1.0, min.abs() * f64::EPSILON);
    if (min + step).is_finite() {
        (min, min + step)
    } else {
        (min - step, min)
    }
}
