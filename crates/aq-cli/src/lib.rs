//! AQ CLI - Command line tools for the route air-quality server.
//!
//! Binaries:
//! - route_pm25: score candidate routes between two points
//! - air_quality: current reading and advice for one location

use anyhow::{bail, Context, Result};
use aq_core::{
    AirQualityReading, HealthCondition, ReadingRequest, RouteRequest, RouteScoreResponse,
    ScoredRoute,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// HTTP client for the air-quality server.
pub struct AdvisoryClient {
    base_url: String,
    client: reqwest::Client,
}

impl AdvisoryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Score the routes for a request; ranked cleanest first.
    pub async fn score_route(&self, request: &RouteRequest) -> Result<RouteScoreResponse> {
        self.post("/v1/routes/pm25", request).await
    }

    pub async fn air_quality(&self, request: &ReadingRequest) -> Result<AirQualityReading> {
        self.post("/v1/air-quality", request).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body["error"].as_str().unwrap_or("no error message");
            bail!("server returned {}: {}", status, message);
        }

        Ok(response.json().await?)
    }
}

/// Parse a condition name as the server spells it (`asthma`, `copd`, ...).
pub fn parse_condition(name: &str) -> Result<HealthCondition> {
    serde_json::from_value(serde_json::Value::String(name.trim().to_lowercase()))
        .with_context(|| format!("unknown health condition: {}", name))
}

/// One line per route for terminal output.
pub fn route_summary(route: &ScoredRoute) -> String {
    let data = if route.data_available {
        format!("{} samples", route.samples.len())
    } else {
        "no data".to_string()
    };
    format!(
        "#{} {:.1} km, {:.0} min, avg PM2.5 {:.1}, max {:.1} [{:?}] ({})",
        route.route_index,
        route.distance_meters / 1000.0,
        route.duration_seconds / 60.0,
        route.average_pm25,
        route.max_pm25,
        route.health_alert,
        data
    )
}
