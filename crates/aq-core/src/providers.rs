//! Capability traits for the external collaborators.
//!
//! Each trait has a single operation; adapters live in `aq-providers` and
//! test doubles implement them directly.

use std::future::Future;

use crate::error::ProviderError;
use crate::models::{CandidateRoute, Coordinate, WeatherConditions};

pub trait Geocoder {
    /// Resolve free text to a coordinate. `Ok(None)` means no match.
    fn resolve(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Option<Coordinate>, ProviderError>> + Send;
}

pub trait RouteProvider {
    /// Candidate paths in provider order. An empty list means no route exists.
    fn get_routes(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> impl Future<Output = Result<Vec<CandidateRoute>, ProviderError>> + Send;
}

pub trait PollutionSampler {
    /// Instantaneous PM2.5 in µg/m³. `Ok(None)` means the value is unavailable.
    fn sample_pm25(
        &self,
        location: Coordinate,
    ) -> impl Future<Output = Result<Option<f64>, ProviderError>> + Send;
}

pub trait WeatherProvider {
    fn current_conditions(
        &self,
        location: Coordinate,
    ) -> impl Future<Output = Result<WeatherConditions, ProviderError>> + Send;
}

pub trait PlaceNamer {
    /// Human-readable place name. `Ok(None)` when nothing is known there.
    fn place_name(
        &self,
        location: Coordinate,
    ) -> impl Future<Output = Result<Option<String>, ProviderError>> + Send;
}
