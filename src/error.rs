use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Reasons a series cannot be charted at all.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("not enough data to draw a chart ({len} points, need at least 2)")]
    InsufficientData { len: usize },

    #[error("no plottable price data in the series")]
    NoPlottableData,

    #[error("invalid chart dimensions {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("failed to render chart: {0}")]
    Render(String),
}

/// Error type returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error("bad_request: {0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Chart(ChartError::InvalidDimensions { .. }) => StatusCode::BAD_REQUEST,
            Self::Chart(ChartError::Render(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Chart(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
