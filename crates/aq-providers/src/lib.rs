//! AQ Providers - HTTP adapters for the external data sources.
//!
//! Every adapter implements one capability trait from `aq-core`. The
//! [`OpenDataProviders`] bundle wires the default set (Open-Meteo, OSRM,
//! Nominatim) behind a single shared HTTP client.

pub mod air_quality;
pub mod geocoding;
mod http;
pub mod places;
pub mod routing;
pub mod weather;

use std::time::Duration;

use aq_core::{
    CandidateRoute, Coordinate, Geocoder, PlaceNamer, PollutionSampler, ProviderError,
    RouteProvider, WeatherConditions, WeatherProvider,
};
use reqwest::Client;

pub use air_quality::OpenMeteoAirQuality;
pub use geocoding::OpenMeteoGeocoder;
pub use places::NominatimPlaces;
pub use routing::OsrmRouteProvider;
pub use weather::OpenMeteoWeather;

/// Endpoints and client settings injected into the adapters at startup.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub geocoding_url: String,
    pub geocoding_language: String,
    pub routing_url: String,
    pub routing_profile: String,
    pub air_quality_url: String,
    pub air_quality_domains: String,
    pub weather_url: String,
    pub reverse_geocoding_url: String,
    pub user_agent: String,
    pub request_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            geocoding_url: "https://geocoding-api.open-meteo.com".to_string(),
            geocoding_language: "en".to_string(),
            routing_url: "https://router.project-osrm.org".to_string(),
            routing_profile: "driving".to_string(),
            air_quality_url: "https://air-quality-api.open-meteo.com".to_string(),
            air_quality_domains: "cams_global".to_string(),
            weather_url: "https://api.open-meteo.com".to_string(),
            reverse_geocoding_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("aq-route/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl ProviderConfig {
    pub fn http_client(&self) -> Result<Client, ProviderError> {
        Client::builder()
            .timeout(self.request_timeout)
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(|err| ProviderError::Unavailable(format!("failed to create HTTP client: {}", err)))
    }
}

/// The default provider set sharing one connection pool.
#[derive(Debug, Clone)]
pub struct OpenDataProviders {
    pub geocoder: OpenMeteoGeocoder,
    pub router: OsrmRouteProvider,
    pub air_quality: OpenMeteoAirQuality,
    pub weather: OpenMeteoWeather,
    pub places: NominatimPlaces,
}

impl OpenDataProviders {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = config.http_client()?;
        Ok(Self {
            geocoder: OpenMeteoGeocoder::new(client.clone(), config),
            router: OsrmRouteProvider::new(client.clone(), config),
            air_quality: OpenMeteoAirQuality::new(client.clone(), config),
            weather: OpenMeteoWeather::new(client.clone(), config),
            places: NominatimPlaces::new(client, config),
        })
    }
}

impl Geocoder for OpenDataProviders {
    async fn resolve(&self, text: &str) -> Result<Option<Coordinate>, ProviderError> {
        self.geocoder.resolve(text).await
    }
}

impl RouteProvider for OpenDataProviders {
    async fn get_routes(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<CandidateRoute>, ProviderError> {
        self.router.get_routes(origin, destination).await
    }
}

impl PollutionSampler for OpenDataProviders {
    async fn sample_pm25(&self, location: Coordinate) -> Result<Option<f64>, ProviderError> {
        self.air_quality.sample_pm25(location).await
    }
}

impl WeatherProvider for OpenDataProviders {
    async fn current_conditions(
        &self,
        location: Coordinate,
    ) -> Result<WeatherConditions, ProviderError> {
        self.weather.current_conditions(location).await
    }
}

impl PlaceNamer for OpenDataProviders {
    async fn place_name(&self, location: Coordinate) -> Result<Option<String>, ProviderError> {
        self.places.place_name(location).await
    }
}
