//! Shared application state.

use aq_core::{Geocoder, PlaceNamer, PollutionSampler, RouteProvider, WeatherProvider};

/// Everything the handlers need from the outside world.
pub trait AdvisoryProviders:
    Geocoder + RouteProvider + PollutionSampler + WeatherProvider + PlaceNamer + Send + Sync + 'static
{
}

impl<T> AdvisoryProviders for T where
    T: Geocoder
        + RouteProvider
        + PollutionSampler
        + WeatherProvider
        + PlaceNamer
        + Send
        + Sync
        + 'static
{
}

/// Read-only state shared across requests; nothing is cached between calls.
pub struct AppState<P> {
    providers: P,
}

impl<P: AdvisoryProviders> AppState<P> {
    pub fn new(providers: P) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &P {
        &self.providers
    }
}
