//! Sample point selection along a route polyline.
//!
//! Points are chosen by distance ratio over the geometry index range, so
//! coverage follows the route length rather than the vertex density.

use crate::models::{CandidateRoute, SamplePoint};

/// Target spacing between samples.
pub const SAMPLE_INTERVAL_M: f64 = 5_000.0;
/// Upper bound on the sample count for a single route.
pub const MAX_SAMPLE_COUNT: usize = 10;

/// Number of sampling intervals for a route of `distance_m` meters.
///
/// Returns 0 for degenerate distances (zero, negative, non-finite).
pub fn sample_count(distance_m: f64) -> usize {
    if !distance_m.is_finite() || distance_m <= 0.0 {
        return 0;
    }
    let intervals = (distance_m / SAMPLE_INTERVAL_M).ceil();
    if intervals >= MAX_SAMPLE_COUNT as f64 {
        MAX_SAMPLE_COUNT
    } else {
        intervals as usize
    }
}

/// Select the sample points for one candidate route.
///
/// Yields `sample_count + 1` points (both ends included). A zero-length
/// route or a single-point geometry yields exactly one point; an empty
/// geometry yields none.
pub fn select_sample_points(route: &CandidateRoute) -> Vec<SamplePoint> {
    let geometry = &route.geometry;
    let Some(first) = geometry.first() else {
        return Vec::new();
    };

    let count = sample_count(route.distance_meters);
    if count == 0 || geometry.len() == 1 {
        return vec![SamplePoint {
            index: 0,
            location: *first,
        }];
    }

    let last_index = (geometry.len() - 1) as f64;
    (0..=count)
        .map(|i| {
            let ratio = i as f64 / count as f64;
            let geometry_index = ((ratio * last_index).floor() as usize).min(geometry.len() - 1);
            SamplePoint {
                index: i,
                location: geometry[geometry_index],
            }
        })
        .collect()
}
