//! Error types for scoring, readings and provider adapters.

use thiserror::Error;

/// Failure reported by an external provider adapter.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed provider response: {0}")]
    Decode(String),

    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// Fatal failures of a route scoring call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScoringError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("destination not found: {0}")]
    DestinationNotFound(String),

    #[error("no route found between the requested points")]
    NoRouteFound,

    #[error("route provider unavailable: {0}")]
    RouteProviderUnavailable(#[source] ProviderError),

    #[error("geocoder unavailable: {0}")]
    GeocoderUnavailable(#[source] ProviderError),
}

/// Fatal failures of a current-reading call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReadingError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("air quality provider unavailable: {0}")]
    AirQualityUnavailable(#[source] ProviderError),
}
