//! Mapping of domain errors onto HTTP responses.

use aq_core::{ReadingError, ScoringError};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error body is always `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ScoringError> for ApiError {
    fn from(err: ScoringError) -> Self {
        let status = match &err {
            ScoringError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ScoringError::DestinationNotFound(_) | ScoringError::NoRouteFound => {
                StatusCode::NOT_FOUND
            }
            ScoringError::RouteProviderUnavailable(_) | ScoringError::GeocoderUnavailable(_) => {
                StatusCode::BAD_GATEWAY
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<ReadingError> for ApiError {
    fn from(err: ReadingError) -> Self {
        let status = match &err {
            ReadingError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ReadingError::AirQualityUnavailable(_) => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::warn!("Request failed ({}): {}", self.status, self.message);
        } else {
            tracing::info!("Request rejected ({}): {}", self.status, self.message);
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
