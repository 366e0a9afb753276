//! Route scoring engine: resolve endpoints, fetch candidates, sample, rank.

use futures::future::join_all;

use crate::error::ScoringError;
use crate::models::{
    CandidateRoute, Coordinate, RouteRequest, RouteScoreResponse, RouteTarget, SamplePoint,
    ScoredRoute,
};
use crate::providers::{Geocoder, PollutionSampler, RouteProvider};
use crate::sampling::select_sample_points;
use crate::scoring::{aggregate, rank, usable_reading};

/// Score every candidate route between the requested endpoints.
///
/// Fatal errors are returned before any sampling starts. Individual sample
/// failures only shrink the sample set of their route.
pub async fn score_request<G, R, S>(
    geocoder: &G,
    router: &R,
    sampler: &S,
    request: &RouteRequest,
) -> Result<RouteScoreResponse, ScoringError>
where
    G: Geocoder + Sync,
    R: RouteProvider + Sync,
    S: PollutionSampler + Sync,
{
    let (origin, destination) = resolve_endpoints(geocoder, request).await?;

    let candidates = router
        .get_routes(origin, destination)
        .await
        .map_err(|err| {
            tracing::warn!("Route provider failed: {}", err);
            ScoringError::RouteProviderUnavailable(err)
        })?;

    if candidates.is_empty() {
        return Err(ScoringError::NoRouteFound);
    }

    let routes = score_candidates(sampler, &candidates).await;
    let recommended_route = routes.first().cloned().ok_or(ScoringError::NoRouteFound)?;

    tracing::info!(
        "Scored {} routes, recommended route {} (avg PM2.5 {})",
        routes.len(),
        recommended_route.route_index,
        recommended_route.average_pm25
    );

    Ok(RouteScoreResponse {
        routes,
        recommended_route,
    })
}

/// Sample all candidates concurrently and return them ranked.
///
/// Every sample request of every route is issued at once and joined before
/// aggregation; results are matched back by position.
pub async fn score_candidates<S>(sampler: &S, candidates: &[CandidateRoute]) -> Vec<ScoredRoute>
where
    S: PollutionSampler + Sync,
{
    let plans: Vec<Vec<SamplePoint>> = candidates.iter().map(select_sample_points).collect();

    let fetches = plans.iter().enumerate().flat_map(move |(route_index, points)| {
        points
            .iter()
            .map(move |point| fetch_sample(sampler, route_index, *point))
    });
    let mut results = join_all(fetches).await.into_iter();

    let scored = candidates
        .iter()
        .zip(&plans)
        .enumerate()
        .map(|(route_index, (route, points))| {
            let readings: Vec<(SamplePoint, Option<f64>)> = points
                .iter()
                .map(|point| (*point, results.next().flatten()))
                .collect();
            let scored = aggregate(route_index, route, &readings);
            tracing::debug!(
                route_index,
                samples = scored.samples.len(),
                planned = points.len(),
                average_pm25 = scored.average_pm25,
                max_pm25 = scored.max_pm25,
                "route aggregated"
            );
            scored
        })
        .collect();

    rank(scored)
}

async fn fetch_sample<S>(sampler: &S, route_index: usize, point: SamplePoint) -> Option<f64>
where
    S: PollutionSampler + Sync,
{
    match sampler.sample_pm25(point.location).await {
        Ok(value) => {
            let usable = usable_reading(value);
            if usable.is_none() {
                tracing::warn!(
                    "No PM2.5 value for route {} sample {} at {},{}",
                    route_index,
                    point.index,
                    point.location.lat,
                    point.location.lng
                );
            }
            usable
        }
        Err(err) => {
            tracing::warn!(
                "PM2.5 fetch failed for route {} sample {} at {},{}: {}",
                route_index,
                point.index,
                point.location.lat,
                point.location.lng,
                err
            );
            None
        }
    }
}

async fn resolve_endpoints<G>(
    geocoder: &G,
    request: &RouteRequest,
) -> Result<(Coordinate, Coordinate), ScoringError>
where
    G: Geocoder + Sync,
{
    let origin = request
        .origin()
        .filter(Coordinate::is_valid)
        .ok_or_else(|| {
            ScoringError::InvalidRequest("missing or invalid start coordinates".to_string())
        })?;

    let destination = match request.target() {
        Some(RouteTarget::Coordinates(end)) if end.is_valid() => end,
        Some(RouteTarget::Coordinates(_)) => {
            return Err(ScoringError::InvalidRequest(
                "invalid end coordinates".to_string(),
            ))
        }
        Some(RouteTarget::Destination(text)) => {
            tracing::info!("Geocoding destination '{}'", text);
            let resolved = geocoder.resolve(&text).await.map_err(|err| {
                tracing::warn!("Geocoder failed for '{}': {}", text, err);
                ScoringError::GeocoderUnavailable(err)
            })?;
            resolved
                .filter(Coordinate::is_valid)
                .ok_or(ScoringError::DestinationNotFound(text))?
        }
        None => {
            return Err(ScoringError::InvalidRequest(
                "missing required coordinates".to_string(),
            ))
        }
    };

    Ok((origin, destination))
}
