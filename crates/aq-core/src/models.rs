//! Core data models for route scoring and air-quality readings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::health::{HealthAdvice, HealthCondition, Notification};

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are finite and inside WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// One path returned by the route provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRoute {
    pub geometry: Vec<Coordinate>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// A geometry point selected for a pollution reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    /// 0-based, ascending along the route.
    pub index: usize,
    pub location: Coordinate,
}

/// A successfully sampled concentration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollutionSample {
    pub location: Coordinate,
    pub pm25: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthAlert {
    #[default]
    Safe,
    Avoid,
}

impl HealthAlert {
    pub fn message(&self) -> &'static str {
        match self {
            HealthAlert::Safe => "This route is safe",
            HealthAlert::Avoid => "Avoid this route, PM2.5 is high",
        }
    }
}

/// A candidate route annotated with aggregated pollution statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRoute {
    /// Position of the route in the provider response; never reassigned.
    pub route_index: usize,
    pub geometry: Vec<Coordinate>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    #[serde(rename = "averagePM25")]
    pub average_pm25: f64,
    #[serde(rename = "maxPM25")]
    pub max_pm25: f64,
    pub health_alert: HealthAlert,
    pub health_message: String,
    /// False when no sample could be obtained and the zero statistics are placeholders.
    pub data_available: bool,
    pub samples: Vec<PollutionSample>,
}

/// Where the route should end.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteTarget {
    Coordinates(Coordinate),
    Destination(String),
}

/// Scoring request as received from clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    #[serde(default)]
    pub start_lat: Option<f64>,
    #[serde(default)]
    pub start_lng: Option<f64>,
    #[serde(default)]
    pub end_lat: Option<f64>,
    #[serde(default)]
    pub end_lng: Option<f64>,
    #[serde(default)]
    pub destination: Option<String>,
}

impl RouteRequest {
    pub fn between(start: Coordinate, end: Coordinate) -> Self {
        Self {
            start_lat: Some(start.lat),
            start_lng: Some(start.lng),
            end_lat: Some(end.lat),
            end_lng: Some(end.lng),
            destination: None,
        }
    }

    pub fn to_destination(start: Coordinate, destination: impl Into<String>) -> Self {
        Self {
            start_lat: Some(start.lat),
            start_lng: Some(start.lng),
            end_lat: None,
            end_lng: None,
            destination: Some(destination.into()),
        }
    }

    pub fn origin(&self) -> Option<Coordinate> {
        match (self.start_lat, self.start_lng) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        }
    }

    /// End coordinates take precedence over destination text.
    pub fn target(&self) -> Option<RouteTarget> {
        if let (Some(lat), Some(lng)) = (self.end_lat, self.end_lng) {
            return Some(RouteTarget::Coordinates(Coordinate::new(lat, lng)));
        }
        self.destination
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(|text| RouteTarget::Destination(text.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteScoreResponse {
    pub routes: Vec<ScoredRoute>,
    pub recommended_route: ScoredRoute,
}

/// Current conditions from the weather provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherConditions {
    pub temperature_c: f64,
    pub humidity_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Present when the client shares a health profile.
    #[serde(default)]
    pub conditions: Option<Vec<HealthCondition>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualityReading {
    pub pm25: i64,
    pub location: String,
    pub timestamp: DateTime<Utc>,
    pub temperature: i64,
    pub humidity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<HealthAdvice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}
