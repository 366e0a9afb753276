//! Open-Meteo forward geocoding.

use aq_core::{Coordinate, Geocoder, ProviderError};
use reqwest::Client;
use serde::Deserialize;

use crate::http::{decode, endpoint, fetch_text};
use crate::ProviderConfig;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<SearchResult>>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    name: Option<String>,
}

/// Resolves place names through the Open-Meteo geocoding search.
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    client: Client,
    base_url: String,
    language: String,
}

impl OpenMeteoGeocoder {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.geocoding_url.clone(),
            language: config.geocoding_language.clone(),
        }
    }
}

impl Geocoder for OpenMeteoGeocoder {
    async fn resolve(&self, text: &str) -> Result<Option<Coordinate>, ProviderError> {
        let request = self
            .client
            .get(endpoint(&self.base_url, "/v1/search"))
            .query(&[
                ("name", text),
                ("count", "1"),
                ("language", self.language.as_str()),
                ("format", "json"),
            ]);
        let (status, body) = fetch_text(request).await?;
        parse_search(status, &body)
    }
}

fn parse_search(status: u16, body: &str) -> Result<Option<Coordinate>, ProviderError> {
    let payload: SearchResponse = decode(status, body)?;
    let best = payload.results.and_then(|results| results.into_iter().next());
    if let Some(result) = &best {
        tracing::debug!(
            "Geocoded to {} ({},{})",
            result.name.as_deref().unwrap_or("?"),
            result.latitude,
            result.longitude
        );
    }
    Ok(best.map(|result| Coordinate::new(result.latitude, result.longitude)))
}
