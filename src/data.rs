use serde::{Deserialize, Serialize};

/// One trading-day observation as handed over by the upstream analysis step.
///
/// Only `close` is required on the wire. Nothing here enforces
/// `low <= open/close <= high`; inconsistent rows just draw oddly.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OHLCVData {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl OHLCVData {
    /// Returns `(open, high, low, close)` when all four are present and finite.
    pub fn finite_ohlc(&self) -> Option<(f64, f64, f64, f64)> {
        let open = self.open.filter(|v| v.is_finite())?;
        let high = self.high.filter(|v| v.is_finite())?;
        let low = self.low.filter(|v| v.is_finite())?;
        let close = Some(self.close).filter(|v| v.is_finite())?;
        Some((open, high, low, close))
    }

    pub fn finite_volume(&self) -> Option<f64> {
        self.volume.filter(|v| v.is_finite())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    Buy,
    Sell,
    Hold,
}

impl SignalType {
    pub fn as_str(self) -> &'static str {
        match self {
            SignalType::Buy => "buy",
            SignalType::Sell => "sell",
            SignalType::Hold => "hold",
        }
    }
}

/// A buy/sell/hold annotation pinned to one date of the series.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SignalEvent {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: SignalType,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicator: Option<String>,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_sparse_point() {
        let point: OHLCVData =
            serde_json::from_str(r#"{"date":"2024-01-02","close":10.5}"#).unwrap();

        assert_eq!(point.date, "2024-01-02");
        assert_eq!(point.close, 10.5);
        assert!(point.open.is_none());
        assert!(point.volume.is_none());
        assert!(point.finite_ohlc().is_none());
    }

    #[test]
    fn deserializes_event_type_lowercase() {
        let event: SignalEvent = serde_json::from_str(
            r#"{"date":"2024-01-02","type":"sell","price":10,"indicator":"RSI overbought"}"#,
        )
        .unwrap();

        assert_eq!(event.kind, SignalType::Sell);
        assert_eq!(event.indicator.as_deref(), Some("RSI overbought"));
    }

    #[test]
    fn rejects_unknown_event_type() {
        let result: Result<SignalEvent, _> =
            serde_json::from_str(r#"{"date":"2024-01-02","type":"short","price":10}"#);
        assert!(result.is_err());
    }

    #[test]
    fn finite_ohlc_rejects_nan() {
        let mut point = fixtures::point("2024-01-02", 1.0, 2.0, 0.5, 1.5);
        assert_eq!(point.finite_ohlc(), Some((1.0, 2.0, 0.5, 1.5)));

        point.open = Some(f64::NAN);
        assert!(point.finite_ohlc().is_none());
    }
}
