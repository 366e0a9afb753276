//! OSRM route service adapter.

use aq_core::{CandidateRoute, Coordinate, ProviderError, RouteProvider};
use reqwest::Client;
use serde::Deserialize;

use crate::http::{endpoint, fetch_text, status_error};
use crate::ProviderConfig;

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    distance: f64,
    duration: f64,
}

/// GeoJSON LineString; positions are `[lng, lat]`.
#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

/// Fetches alternative routes from an OSRM server.
#[derive(Debug, Clone)]
pub struct OsrmRouteProvider {
    client: Client,
    base_url: String,
    profile: String,
}

impl OsrmRouteProvider {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.routing_url.clone(),
            profile: config.routing_profile.clone(),
        }
    }

    fn route_url(&self, origin: Coordinate, destination: Coordinate) -> String {
        endpoint(
            &self.base_url,
            &format!(
                "/route/v1/{}/{},{};{},{}",
                self.profile, origin.lng, origin.lat, destination.lng, destination.lat
            ),
        )
    }
}

impl RouteProvider for OsrmRouteProvider {
    async fn get_routes(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<CandidateRoute>, ProviderError> {
        let request = self.client.get(self.route_url(origin, destination)).query(&[
            ("alternatives", "true"),
            ("geometries", "geojson"),
            ("overview", "full"),
        ]);
        let (status, body) = fetch_text(request).await?;
        let routes = parse_routes(status, &body)?;
        tracing::info!("OSRM returned {} candidate routes", routes.len());
        Ok(routes)
    }
}

fn parse_routes(status: u16, body: &str) -> Result<Vec<CandidateRoute>, ProviderError> {
    let payload: Option<OsrmResponse> = serde_json::from_str(body).ok();

    // OSRM answers "no route" with HTTP 400 and a structured code.
    if let Some(payload) = &payload {
        if payload.code == "NoRoute" {
            return Ok(Vec::new());
        }
    }

    if !(200..300).contains(&status) {
        return Err(status_error(status, body));
    }

    let payload = payload
        .ok_or_else(|| ProviderError::Decode("unexpected OSRM response body".to_string()))?;
    if payload.code != "Ok" {
        return Err(ProviderError::Unavailable(format!(
            "OSRM {}: {}",
            payload.code,
            payload.message.unwrap_or_default()
        )));
    }

    Ok(payload
        .routes
        .into_iter()
        .map(|route| CandidateRoute {
            geometry: route
                .geometry
                .coordinates
                .into_iter()
                .map(|[lng, lat]| Coordinate::new(lat, lng))
                .collect(),
            distance_meters: route.distance.max(0.0),
            duration_seconds: route.duration.max(0.0),
        })
        .collect())
}
