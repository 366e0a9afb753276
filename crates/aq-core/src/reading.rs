//! Current air-quality reading for a single location.

use chrono::Utc;

use crate::error::ReadingError;
use crate::health::{advise, notification_for};
use crate::models::{AirQualityReading, Coordinate, ReadingRequest, WeatherConditions};
use crate::providers::{PlaceNamer, PollutionSampler, WeatherProvider};
use crate::scoring::{round_pm25, usable_reading};

pub const DEFAULT_TEMPERATURE_C: f64 = 25.0;
pub const DEFAULT_HUMIDITY_PCT: f64 = 60.0;
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Assemble a reading from the sampler, weather and place lookups.
///
/// Only a sampler failure is fatal; weather and place fall back to defaults.
pub async fn current_reading<S, W, P>(
    sampler: &S,
    weather: &W,
    places: &P,
    request: &ReadingRequest,
) -> Result<AirQualityReading, ReadingError>
where
    S: PollutionSampler + Sync,
    W: WeatherProvider + Sync,
    P: PlaceNamer + Sync,
{
    let location = Coordinate::new(request.latitude, request.longitude);
    if !location.is_valid() {
        return Err(ReadingError::InvalidRequest(
            "latitude/longitude out of range".to_string(),
        ));
    }

    let (pm25, conditions, place) = futures::join!(
        sampler.sample_pm25(location),
        weather.current_conditions(location),
        places.place_name(location)
    );

    let pm25 = match pm25 {
        Ok(value) => round_pm25(usable_reading(value).unwrap_or(0.0)),
        Err(err) => {
            tracing::warn!(
                "Air quality fetch failed for {},{}: {}",
                location.lat,
                location.lng,
                err
            );
            return Err(ReadingError::AirQualityUnavailable(err));
        }
    };

    let conditions = conditions.unwrap_or_else(|err| {
        tracing::warn!("Weather fetch failed, using defaults: {}", err);
        WeatherConditions {
            temperature_c: DEFAULT_TEMPERATURE_C,
            humidity_pct: DEFAULT_HUMIDITY_PCT,
        }
    });

    let place = match place {
        Ok(Some(name)) if !name.trim().is_empty() => name,
        Ok(_) => UNKNOWN_LOCATION.to_string(),
        Err(err) => {
            tracing::warn!("Place lookup failed: {}", err);
            UNKNOWN_LOCATION.to_string()
        }
    };

    let (advice, notification) = match request.conditions.as_deref() {
        Some(health) => (
            Some(advise(pm25, health)),
            notification_for(pm25, &place, !health.is_empty()),
        ),
        None => (None, None),
    };

    tracing::info!("Reading for {}: PM2.5 {}", place, pm25);

    Ok(AirQualityReading {
        pm25: pm25 as i64,
        location: place,
        timestamp: Utc::now(),
        temperature: conditions.temperature_c.round() as i64,
        humidity: conditions.humidity_pct.round() as i64,
        advice,
        notification,
    })
}
