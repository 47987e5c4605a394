use std::env;

use crate::chart::tooltip::Locale;
use crate::chart::ChartSettings;

/// Server configuration read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub chart: ChartSettings,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source. Unparseable or
    /// out-of-range values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = ChartSettings::default();

        let get = |name: &str| lookup(name).map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let num = |name: &str, default: f64| -> f64 {
            get(name)
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .unwrap_or(default)
        };

        let locale = match get("CHART_LOCALE").map(|s| s.parse::<Locale>()) {
            Some(Ok(locale)) => locale,
            Some(Err(e)) => {
                tracing::warn!("{e}, falling back to {:?}", defaults.locale);
                defaults.locale
            }
            None => defaults.locale,
        };

        let width = num("CHART_WIDTH", defaults.width);
        let height = num("CHART_HEIGHT", defaults.height);
        let price_padding = num("CHART_PRICE_PADDING", defaults.price_padding);
        let volume_headroom = num("CHART_VOLUME_HEADROOM", defaults.volume_headroom);
        let body_ratio = num("CHART_BODY_RATIO", defaults.body_ratio);
        let marker_radius = num("CHART_MARKER_RADIUS", defaults.marker_radius);
        let tick_target = get("CHART_TICK_TARGET")
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|t| *t > 0)
            .unwrap_or(defaults.tick_target);

        let chart = ChartSettings {
            width: if width > 0.0 { width } else { defaults.width },
            height: if height > 0.0 { height } else { defaults.height },
            price_padding: if price_padding >= 0.0 {
                price_padding
            } else {
                defaults.price_padding
            },
            volume_headroom: if volume_headroom >= 1.0 {
                volume_headroom
            } else {
                defaults.volume_headroom
            },
            body_ratio: body_ratio.clamp(0.6, 0.8),
            tick_target,
            marker_radius: if marker_radius > 0.0 {
                marker_radius
            } else {
                defaults.marker_radius
            },
            locale,
            ..defaults
        };

        ServerConfig {
            bind: get("BIND").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: get("PORT").and_then(|s| s.parse().ok()).unwrap_or(3000),
            chart,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
