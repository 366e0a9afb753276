//! Open-Meteo forecast adapter for current temperature and humidity.

use aq_core::{Coordinate, ProviderError, WeatherConditions, WeatherProvider};
use reqwest::Client;
use serde::Deserialize;

use crate::http::{decode, endpoint, fetch_text};
use crate::ProviderConfig;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current: Option<ForecastCurrent>,
}

#[derive(Debug, Deserialize)]
struct ForecastCurrent {
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct OpenMeteoWeather {
    client: Client,
    base_url: String,
}

impl OpenMeteoWeather {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.weather_url.clone(),
        }
    }
}

impl WeatherProvider for OpenMeteoWeather {
    async fn current_conditions(
        &self,
        location: Coordinate,
    ) -> Result<WeatherConditions, ProviderError> {
        let request = self
            .client
            .get(endpoint(&self.base_url, "/v1/forecast"))
            .query(&[
                ("latitude", location.lat.to_string()),
                ("longitude", location.lng.to_string()),
                (
                    "current",
                    "temperature_2m,relative_humidity_2m".to_string(),
                ),
            ]);
        let (status, body) = fetch_text(request).await?;
        parse_conditions(status, &body)
    }
}

fn parse_conditions(status: u16, body: &str) -> Result<WeatherConditions, ProviderError> {
    let payload: ForecastResponse = decode(status, body)?;
    let current = payload
        .current
        .ok_or_else(|| ProviderError::Decode("weather response missing current data".to_string()))?;
    match (current.temperature_2m, current.relative_humidity_2m) {
        (Some(temperature_c), Some(humidity_pct)) => Ok(WeatherConditions {
            temperature_c,
            humidity_pct,
        }),
        _ => Err(ProviderError::Decode(
            "weather response missing temperature or humidity".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_temperature_and_humidity() {
        let body = r#"{"current": {"time": "2024-01-15T10:00", "temperature_2m": 31.4, "relative_humidity_2m": 66}}"#;
        let conditions = parse_conditions(200, body).unwrap();
        assert_eq!(conditions.temperature_c, 31.4);
        assert_eq!(conditions.humidity_pct, 66.0);
    }

    #[test]
    fn missing_fields_are_decode_errors() {
        assert!(matches!(
            parse_conditions(200, r#"{"latitude": 1.0}"#),
            Err(ProviderError::Decode(_))
        ));
        assert!(matches!(
            parse_conditions(200, r#"{"current": {"temperature_2m": 20.0}}"#),
            Err(ProviderError::Decode(_))
        ));
    }
}
