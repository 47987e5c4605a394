use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chart::format::{format_price, format_volume};
use crate::chart::overlay::MergedPoint;
use crate::data::SignalType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ko,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ko" => Ok(Locale::Ko),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

struct Labels {
    date: &'static str,
    open: &'static str,
    high: &'static str,
    low: &'static str,
    close: &'static str,
    volume: &'static str,
    signal: &'static str,
    buy: &'static str,
    sell: &'static str,
    hold: &'static str,
    no_data: &'static str,
}

static EN: Labels = Labels {
    date: "Date",
    open: "Open",
    high: "High",
    low: "Low",
    close: "Close",
    volume: "Volume",
    signal: "Signal",
    buy: "Buy",
    sell: "Sell",
    hold: "Hold",
    no_data: "Not enough chart data to display.",
};

static KO: Labels = Labels {
    date: "날짜",
    open: "시가",
    high: "고가",
    low: "저가",
    close: "종가",
    volume: "거래량",
    signal: "신호",
    buy: "매수",
    sell: "매도",
    hold: "관망",
    no_data: "차트 데이터를 불러올 수 없습니다.",
};

impl Locale {
    fn labels(self) -> &'static Labels {
        match self {
            Locale::En => &EN,
            Locale::Ko => &KO,
        }
    }

    pub fn signal_label(self, kind: SignalType) -> &'static str {
        let labels = self.labels();
        match kind {
            SignalType::Buy => labels.buy,
            SignalType::Sell => labels.sell,
            SignalType::Hold => labels.hold,
        }
    }

    /// Placeholder text shown instead of a chart.
    pub fn no_data_message(self) -> &'static str {
        self.labels().no_data
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Open,
    High,
    Low,
    Close,
    Volume,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipRow {
    pub field: Field,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipSignal {
    #[serde(rename = "type")]
    pub kind: SignalType,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator: Option<String>,
    /// Display line, e.g. `Signal: Buy (RSI oversold)`.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub title: String,
    pub rows: Vec<TooltipRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<TooltipSignal>,
}

impl Tooltip {
    /// Plain-text rendition, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.title.clone()];
        lines.extend(self.rows.iter().map(|r| format!("{}: {}", r.label, r.value)));
        if let Some(signal) = &self.signal {
            lines.push(signal.text.clone());
        }
        lines
    }
}

/// Hover block for one date. Returns `None` unless the cursor is active over a point.
pub fn compose_tooltip(
    active: bool,
    payload: Option<&MergedPoint<'_>>,
    label: &str,
    locale: Locale,
) -> Option<Tooltip> {
    if !active {
        return None;
    }
    let merged = payload?;
    let point = merged.point;
    let labels = locale.labels();

    let candidates = [
        (Field::Open, labels.open, point.open, false),
        (Field::High, labels.high, point.high, false),
        (Field::Low, labels.low, point.low, false),
        (Field::Close, labels.close, Some(point.close), false),
        (Field::Volume, labels.volume, point.volume, true),
    ];

    let rows = candidates
        .into_iter()
        .filter_map(|(field, name, value, is_volume)| {
            let value = value.filter(|v| v.is_finite())?;
            let value = if is_volume {
                format_volume(value)
            } else {
                format_price(value)
            };
            Some(TooltipRow {
                field,
                label: name.to_string(),
                value,
            })
        })
        .collect();

    let signal = merged.event.map(|event| {
        let kind_label = locale.signal_label(event.kind);
        let mut text = format!("{}: {}", labels.signal, kind_label);
        if let Some(indicator) = &event.indicator {
            text.push_str(&format!(" ({indicator})"));
        }
        TooltipSignal {
            kind: event.kind,
            label: kind_label.to_string(),
            indicator: event.indicator.clone(),
            text,
        }
    });

    Some(Tooltip {
        title: format!("{}: {}", labels.date, label),
        rows,
        signal,
    })
}
