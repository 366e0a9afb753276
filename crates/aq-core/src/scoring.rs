//! Per-route aggregation, health classification and ranking.

use std::cmp::Ordering;

use crate::models::{CandidateRoute, HealthAlert, PollutionSample, SamplePoint, ScoredRoute};

/// Routes averaging above this PM2.5 value are flagged `AVOID`.
pub const AVOID_THRESHOLD_PM25: f64 = 50.0;

/// Round a concentration to the nearest whole µg/m³, half away from zero.
pub fn round_pm25(value: f64) -> f64 {
    value.round()
}

pub fn classify(average_pm25: f64) -> HealthAlert {
    if average_pm25 > AVOID_THRESHOLD_PM25 {
        HealthAlert::Avoid
    } else {
        HealthAlert::Safe
    }
}

/// A sampler result is usable only when it is a finite, non-negative number.
pub fn usable_reading(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

/// Build a [`ScoredRoute`] from one candidate and the readings taken along it.
///
/// `readings` pairs each sample point with its result; unavailable readings
/// are dropped before aggregation.
pub fn aggregate(
    route_index: usize,
    route: &CandidateRoute,
    readings: &[(SamplePoint, Option<f64>)],
) -> ScoredRoute {
    let samples: Vec<PollutionSample> = readings
        .iter()
        .filter_map(|(point, value)| {
            usable_reading(*value).map(|pm25| PollutionSample {
                location: point.location,
                pm25,
            })
        })
        .collect();

    let (average, max) = if samples.is_empty() {
        (0.0, 0.0)
    } else {
        let sum: f64 = samples.iter().map(|s| s.pm25).sum();
        let max = samples.iter().map(|s| s.pm25).fold(f64::MIN, f64::max);
        (sum / samples.len() as f64, max)
    };

    let average_pm25 = round_pm25(average);
    let max_pm25 = round_pm25(max);
    let health_alert = classify(average_pm25);

    ScoredRoute {
        route_index,
        geometry: route.geometry.clone(),
        distance_meters: route.distance_meters,
        duration_seconds: route.duration_seconds,
        average_pm25,
        max_pm25,
        health_alert,
        health_message: health_alert.message().to_string(),
        data_available: !samples.is_empty(),
        samples,
    }
}

/// Stable ascending sort by average PM2.5; ties keep provider order.
pub fn rank(mut routes: Vec<ScoredRoute>) -> Vec<ScoredRoute> {
    routes.sort_by(|a, b| {
        a.average_pm25
            .partial_cmp(&b.average_pm25)
            .unwrap_or(Ordering::Equal)
    });
    routes
}
