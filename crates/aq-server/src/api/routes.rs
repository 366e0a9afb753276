//! REST API routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::rate_limit::{self, RateLimiter};
use crate::config::Config;
use crate::state::{AdvisoryProviders, AppState};
use aq_core::{
    advise, current_reading, notification_for, score_request, AirQualityReading, HealthAdvice,
    HealthCondition, Notification, ReadingRequest, RouteRequest, RouteScoreResponse,
};

/// Create the API router.
pub fn create_router<P: AdvisoryProviders>(config: &Config) -> Router<Arc<AppState<P>>> {
    let limiter = RateLimiter::new(
        config.rate_limit_rps,
        config.rate_limit_enabled,
        config.trust_proxy,
    );

    let public_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/v1/advice", post(advice_handler));

    // Each call here fans out to several provider requests.
    let provider_routes = Router::new()
        .route("/v1/routes/pm25", post(score_route_handler::<P>))
        .route("/v1/air-quality", post(air_quality_handler::<P>))
        .layer(middleware::from_fn_with_state(limiter, rate_limit::rate_limit));

    public_routes.merge(provider_routes)
}

// === Request/Response types ===

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    pub pm25: f64,
    #[serde(default)]
    pub conditions: Vec<HealthCondition>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceResponse {
    pub advice: HealthAdvice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

// === Handlers ===

async fn score_route_handler<P: AdvisoryProviders>(
    State(state): State<Arc<AppState<P>>>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<RouteScoreResponse>, ApiError> {
    let Json(request) = payload?;
    tracing::info!(
        start_lat = ?request.start_lat,
        start_lng = ?request.start_lng,
        end_lat = ?request.end_lat,
        end_lng = ?request.end_lng,
        destination = ?request.destination,
        "Route PM2.5 request"
    );

    let providers = state.providers();
    let response = score_request(providers, providers, providers, &request).await?;
    Ok(Json(response))
}

async fn air_quality_handler<P: AdvisoryProviders>(
    State(state): State<Arc<AppState<P>>>,
    payload: Result<Json<ReadingRequest>, JsonRejection>,
) -> Result<Json<AirQualityReading>, ApiError> {
    let Json(request) = payload?;
    tracing::info!(
        "Fetching air quality for {},{}",
        request.latitude,
        request.longitude
    );

    let providers = state.providers();
    let reading = current_reading(providers, providers, providers, &request).await?;
    Ok(Json(reading))
}

async fn advice_handler(
    payload: Result<Json<AdviceRequest>, JsonRejection>,
) -> Result<Json<AdviceResponse>, ApiError> {
    let Json(request) = payload?;
    if !request.pm25.is_finite() || request.pm25 < 0.0 {
        return Err(ApiError::bad_request("pm25 must be a non-negative number"));
    }

    let location = request.location.as_deref().unwrap_or("your area");
    Ok(Json(AdviceResponse {
        advice: advise(request.pm25, &request.conditions),
        notification: notification_for(request.pm25, location, !request.conditions.is_empty()),
    }))
}
