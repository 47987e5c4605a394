use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::chart::overlay::{find_point, merge_events};
use crate::chart::svg::{render, render_placeholder};
use crate::chart::tooltip::{compose_tooltip, Locale, Tooltip};
use crate::chart::ChartSettings;
use crate::data::{OHLCVData, SignalEvent};
use crate::engine::{ChartLayout, Engine};
use crate::error::{ApiError, ChartError};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/chart/layout", post(layout))
        .route("/api/chart/svg", post(svg))
        .route("/api/chart/tooltip", post(tooltip))
}

#[derive(Deserialize)]
pub struct ChartBody {
    #[serde(alias = "chartData")]
    series: Vec<OHLCVData>,
    #[serde(default, alias = "signalEvents")]
    events: Vec<SignalEvent>,
    width: Option<f64>,
    height: Option<f64>,
    locale: Option<Locale>,
}

#[derive(Deserialize)]
pub struct TooltipBody {
    #[serde(alias = "chartData")]
    series: Vec<OHLCVData>,
    #[serde(default, alias = "signalEvents")]
    events: Vec<SignalEvent>,
    date: String,
    locale: Option<Locale>,
}

fn settings_for(state: &AppState, body: &ChartBody) -> Result<ChartSettings, ApiError> {
    let defaults = &state.config.chart;
    let width = body.width.unwrap_or(defaults.width);
    let height = body.height.unwrap_or(defaults.height);

    if !(width > 0.0 && height > 0.0) {
        return Err(ChartError::InvalidDimensions { width, height }.into());
    }

    let mut settings = defaults.clone().with_size(width, height);
    if let Some(locale) = body.locale {
        settings.locale = locale;
    }
    Ok(settings)
}

/// POST /api/chart/layout: computed domains, geometry and markers as JSON.
async fn layout(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChartBody>,
) -> Result<Json<ChartLayout>, ApiError> {
    let settings = settings_for(&state, &body)?;
    let engine = Engine::new(settings);

    match engine.run(&body.series, &body.events) {
        Ok(layout) => Ok(Json(layout)),
        Err(e) => {
            tracing::info!(points = body.series.len(), "chart layout rejected: {e}");
            Err(e.into())
        }
    }
}

/// POST /api/chart/svg: the rendered chart, or a placeholder image when the
/// series cannot be charted.
async fn svg(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChartBody>,
) -> Result<Response, ApiError> {
    let settings = settings_for(&state, &body)?;
    let (width, height, locale) = (settings.width, settings.height, settings.locale);
    let engine = Engine::new(settings);

    let document = match engine.run(&body.series, &body.events) {
        Ok(layout) => render(&layout)?,
        Err(e @ ChartError::InvalidDimensions { .. }) => return Err(e.into()),
        Err(e) => {
            tracing::info!(points = body.series.len(), "rendering placeholder: {e}");
            render_placeholder(width, height, locale.no_data_message())?
        }
    };

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], document).into_response())
}

/// POST /api/chart/tooltip: hover block for one date, `null` when the date
/// is not part of the series.
async fn tooltip(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TooltipBody>,
) -> Result<Json<Option<Tooltip>>, ApiError> {
    if body.date.trim().is_empty() {
        return Err(ApiError::BadRequest("date must not be empty".to_string()));
    }

    let locale = body.locale.unwrap_or(state.config.chart.locale);
    let merged = merge_events(&body.series, &body.events);
    let payload = find_point(&merged, &body.date);

    let tip = compose_tooltip(true, payload, &body.date, locale);
    match &tip {
        Some(tip) => tracing::debug!(lines = ?tip.lines(), "tooltip composed"),
        None => tracing::debug!(date = %body.date, "tooltip requested for unknown date"),
    }

    Ok(Json(tip))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    fn state() -> Arc<AppState> {
        AppState::new(ServerConfig::from_lookup(|_| None))
    }

    fn july_body() -> Value {
        json!({
            "chartData": [
                {"date": "2024-07-01", "open": 100, "high": 105, "low": 95, "close": 102, "volume": 1000},
                {"date": "2024-07-02", "open": 102, "high": 108, "low": 100, "close": 107, "volume": 1500},
                {"date": "2024-07-03", "open": 107, "high": 107, "low": 103, "close": 104, "volume": 800}
            ],
            "signalEvents": [
                {"date": "2024-07-02", "type": "buy", "price": 107, "indicator": "test"}
            ]
        })
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn layout_returns_domains_and_markers() {
        let body: ChartBody = serde_json::from_value(july_body()).unwrap();
        let Json(layout) = layout(State(state()), Json(body)).await.unwrap();

        assert_eq!(layout.point_count, 3);
        assert_eq!(layout.volume.unwrap().domain.max, 2250.0);
        assert_eq!(layout.markers.len(), 1);

        let value = serde_json::to_value(&layout.markers[0]).unwrap();
        assert_eq!(value["type"], "buy");
        assert_eq!(value["icon"], "arrow_up");
    }

    #[tokio::test]
    async fn layout_rejects_single_point() {
        let body: ChartBody = serde_json::from_value(json!({
            "series": [{"date": "2024-07-01", "close": 1.0}]
        }))
        .unwrap();

        let err = layout(State(state()), Json(body)).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn layout_rejects_bad_dimensions() {
        let mut raw = july_body();
        raw["width"] = json!(0);
        let body: ChartBody = serde_json::from_value(raw).unwrap();

        let err = layout(State(state()), Json(body)).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn svg_renders_chart() {
        let body: ChartBody = serde_json::from_value(july_body()).unwrap();
        let response = svg(State(state()), Json(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/svg+xml"
        );
        let text = body_string(response).await;
        assert_eq!(text.matches("#37474F").count(), 3);
    }

    #[tokio::test]
    async fn svg_placeholder_for_short_series() {
        let body: ChartBody = serde_json::from_value(json!({
            "series": [{"date": "2024-07-01", "close": 1.0}],
            "locale": "ko"
        }))
        .unwrap();
        let response = svg(State(state()), Json(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let text = body_string(response).await;
        assert!(text.contains("차트 데이터를 불러올 수 없습니다."));
        assert!(!text.contains("#37474F"));
    }

    #[tokio::test]
    async fn tooltip_for_known_and_unknown_dates() {
        let mut raw = july_body();
        raw["date"] = json!("2024-07-02");
        let body: TooltipBody = serde_json::from_value(raw.clone()).unwrap();
        let Json(tip) = tooltip(State(state()), Json(body)).await.unwrap();

        let tip = tip.unwrap();
        assert_eq!(tip.title, "Date: 2024-07-02");
        assert_eq!(tip.signal.unwrap().text, "Signal: Buy (test)");

        raw["date"] = json!("2024-07-09");
        let body: TooltipBody = serde_json::from_value(raw).unwrap();
        let Json(tip) = tooltip(State(state()), Json(body)).await.unwrap();
        assert!(tip.is_none());
    }

    #[tokio::test]
    async fn tooltip_rejects_blank_date() {
        let mut raw = july_body();
        raw["date"] = json!("  ");
        let body: TooltipBody = serde_json::from_value(raw).unwrap();

        let err = tooltip(State(state()), Json(body)).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
