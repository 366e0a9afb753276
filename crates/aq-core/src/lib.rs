pub mod engine;
pub mod error;
pub mod health;
pub mod models;
pub mod providers;
pub mod reading;
pub mod sampling;
pub mod scoring;

pub use engine::{score_candidates, score_request};
pub use error::{ProviderError, ReadingError, ScoringError};
pub use health::{
    advise, notification_for, AirQualityLevel, HealthAdvice, HealthCondition, Notification,
    NotificationSeverity,
};
pub use models::{
    AirQualityReading, CandidateRoute, Coordinate, HealthAlert, PollutionSample, ReadingRequest,
    RouteRequest, RouteScoreResponse, RouteTarget, SamplePoint, ScoredRoute, WeatherConditions,
};
pub use providers::{Geocoder, PlaceNamer, PollutionSampler, RouteProvider, WeatherProvider};
pub use reading::current_reading;
pub use sampling::{sample_count, select_sample_points, MAX_SAMPLE_COUNT, SAMPLE_INTERVAL_M};
pub use scoring::{aggregate, classify, rank, AVOID_THRESHOLD_PM25};
