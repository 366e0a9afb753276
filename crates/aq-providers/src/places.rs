//! Nominatim reverse lookup for display names.

use aq_core::{Coordinate, PlaceNamer, ProviderError};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

use crate::http::{decode, endpoint, fetch_text};
use crate::ProviderConfig;

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<ReverseAddress>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ReverseAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NominatimPlaces {
    client: Client,
    base_url: String,
}

impl NominatimPlaces {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.reverse_geocoding_url.clone(),
        }
    }

    /// Nominatim requires an identifying User-Agent; the shared client sets it.
    fn reverse_request(&self, location: Coordinate) -> RequestBuilder {
        self.client
            .get(endpoint(&self.base_url, "/reverse"))
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", location.lat.to_string()),
                ("lon", location.lng.to_string()),
                ("zoom", "10".to_string()),
            ])
    }
}

impl PlaceNamer for NominatimPlaces {
    async fn place_name(&self, location: Coordinate) -> Result<Option<String>, ProviderError> {
        let (status, body) = fetch_text(self.reverse_request(location)).await?;
        parse_place(status, &body)
    }
}

/// "name, state, country", skipping empty or repeated parts.
fn parse_place(status: u16, body: &str) -> Result<Option<String>, ProviderError> {
    let payload: ReverseResponse = decode(status, body)?;
    if let Some(error) = payload.error {
        tracing::debug!("Reverse lookup found nothing: {}", error);
        return Ok(None);
    }

    let address = payload.address.unwrap_or_default();
    let primary = payload
        .name
        .filter(|name| !name.trim().is_empty())
        .or(address.city)
        .or(address.town)
        .or(address.village);

    let mut parts: Vec<String> = Vec::new();
    for part in [primary, address.state, address.country].into_iter().flatten() {
        let part = part.trim().to_string();
        if !part.is_empty() && !parts.contains(&part) {
            parts.push(part);
        }
    }

    if parts.is_empty() {
        Ok(None)
    } else {
        Ok(Some(parts.join(", ")))
    }
}
