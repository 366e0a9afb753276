//! Open-Meteo air-quality adapter for PM2.5 samples.

use aq_core::{Coordinate, PollutionSampler, ProviderError};
use reqwest::Client;
use serde::Deserialize;

use crate::http::{decode, endpoint, fetch_text};
use crate::ProviderConfig;

#[derive(Debug, Deserialize)]
struct AirQualityResponse {
    #[serde(default)]
    current: Option<AirQualityCurrent>,
}

#[derive(Debug, Deserialize)]
struct AirQualityCurrent {
    #[serde(default)]
    pm2_5: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct OpenMeteoAirQuality {
    client: Client,
    base_url: String,
    domains: String,
}

impl OpenMeteoAirQuality {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.air_quality_url.clone(),
            domains: config.air_quality_domains.clone(),
        }
    }
}

impl PollutionSampler for OpenMeteoAirQuality {
    async fn sample_pm25(&self, location: Coordinate) -> Result<Option<f64>, ProviderError> {
        let request = self
            .client
            .get(endpoint(&self.base_url, "/v1/air-quality"))
            .query(&[
                ("latitude", location.lat.to_string()),
                ("longitude", location.lng.to_string()),
                ("current", "pm2_5".to_string()),
                ("timezone", "auto".to_string()),
                ("domains", self.domains.clone()),
            ]);
        let (status, body) = fetch_text(request).await?;
        parse_pm25(status, &body)
    }
}

fn parse_pm25(status: u16, body: &str) -> Result<Option<f64>, ProviderError> {
    let payload: AirQualityResponse = decode(status, body)?;
    Ok(payload.current.and_then(|current| current.pm2_5))
}
