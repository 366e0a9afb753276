use aq_core::{
    CandidateRoute, Coordinate, Geocoder, PlaceNamer, PollutionSampler, ProviderError,
    RouteProvider, WeatherConditions, WeatherProvider,
};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

use crate::{api, config::Config, state::AppState};

#[derive(Default)]
struct Calls {
    geocode: AtomicUsize,
    routes: AtomicUsize,
    samples: AtomicUsize,
}

/// In-memory providers. Routes are told apart by longitude: every point of
/// a stub route shares one `lng`, and `pm25_by_lng` decides its readings.
#[derive(Clone)]
struct StubProviders {
    destination: Option<Coordinate>,
    routes: Result<Vec<CandidateRoute>, ProviderError>,
    pm25_by_lng: Vec<(f64, f64)>,
    calls: Arc<Calls>,
}

impl StubProviders {
    fn with_routes(routes: Vec<CandidateRoute>, pm25_by_lng: Vec<(f64, f64)>) -> Self {
        Self {
            destination: Some(Coordinate::new(13.9, 100.6)),
            routes: Ok(routes),
            pm25_by_lng,
            calls: Arc::new(Calls::default()),
        }
    }
}

impl Geocoder for StubProviders {
    async fn resolve(&self, _text: &str) -> Result<Option<Coordinate>, ProviderError> {
        self.calls.geocode.fetch_add(1, Ordering::SeqCst);
        Ok(self.destination)
    }
}

impl RouteProvider for StubProviders {
    async fn get_routes(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
    ) -> Result<Vec<CandidateRoute>, ProviderError> {
        self.calls.routes.fetch_add(1, Ordering::SeqCst);
        self.routes.clone()
    }
}

impl PollutionSampler for StubProviders {
    async fn sample_pm25(&self, location: Coordinate) -> Result<Option<f64>, ProviderError> {
        self.calls.samples.fetch_add(1, Ordering::SeqCst);
        self.pm25_by_lng
            .iter()
            .find(|(lng, _)| *lng == location.lng)
            .map(|(_, pm25)| Some(*pm25))
            .ok_or_else(|| ProviderError::Transport("connection refused".to_string()))
    }
}

impl WeatherProvider for StubProviders {
    async fn current_conditions(
        &self,
        _location: Coordinate,
    ) -> Result<WeatherConditions, ProviderError> {
        Ok(WeatherConditions {
            temperature_c: 30.2,
            humidity_pct: 64.8,
        })
    }
}

impl PlaceNamer for StubProviders {
    async fn place_name(&self, _location: Coordinate) -> Result<Option<String>, ProviderError> {
        Ok(Some("Bang Rak, Bangkok, Thailand".to_string()))
    }
}

fn route_at(lng: f64, distance_m: f64) -> CandidateRoute {
    CandidateRoute {
        geometry: (0..20)
            .map(|i| Coordinate::new(13.7 + i as f64 * 0.01, lng))
            .collect(),
        distance_meters: distance_m,
        duration_seconds: distance_m / 11.0,
    }
}

fn setup_app(providers: StubProviders) -> axum::Router {
    let mut config = Config::from_env();
    config.rate_limit_enabled = false;

    let state = Arc::new(AppState::new(providers));
    api::routes(&config)
        .with_state(state)
        .layer(middleware::from_fn(api::request_id::ensure_request_id))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

#[tokio::test]
async fn health_check_responds() {
    let app = setup_app(StubProviders::with_routes(Vec::new(), Vec::new()));
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn cleaner_route_is_ranked_first() {
    let providers = StubProviders::with_routes(
        vec![route_at(100.5, 9_000.0), route_at(100.6, 11_000.0)],
        vec![(100.5, 60.0), (100.6, 30.0)],
    );
    let app = setup_app(providers);

    let response = app
        .oneshot(post_json(
            "/v1/routes/pm25",
            json!({"startLat": 13.7, "startLng": 100.5, "endLat": 13.9, "endLng": 100.6}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;

    let routes = body["routes"].as_array().expect("routes");
    assert_eq!(routes.len(), 2);
    assert_eq!(routes[0]["routeIndex"], json!(1));
    assert_eq!(routes[0]["averagePM25"], json!(30.0));
    assert_eq!(routes[0]["healthAlert"], json!("SAFE"));
    assert_eq!(routes[1]["routeIndex"], json!(0));
    assert_eq!(routes[1]["averagePM25"], json!(60.0));
    assert_eq!(routes[1]["healthAlert"], json!("AVOID"));
    assert_eq!(body["recommendedRoute"], routes[0]);
}

#[tokio::test]
async fn route_without_readings_is_still_returned() {
    let providers = StubProviders::with_routes(
        vec![route_at(100.5, 12_000.0), route_at(100.7, 12_000.0)],
        vec![(100.5, 22.0)],
    );
    let app = setup_app(providers.clone());

    let response = app
        .oneshot(post_json(
            "/v1/routes/pm25",
            json!({"startLat": 13.7, "startLng": 100.5, "endLat": 13.9, "endLng": 100.6}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;

    // 4 points per 12 km route, both routes sampled.
    assert_eq!(providers.calls.samples.load(Ordering::SeqCst), 8);

    let routes = body["routes"].as_array().expect("routes");
    let empty = routes
        .iter()
        .find(|r| r["routeIndex"] == json!(1))
        .expect("route 1 present");
    assert_eq!(empty["samples"], json!([]));
    assert_eq!(empty["averagePM25"], json!(0.0));
    assert_eq!(empty["maxPM25"], json!(0.0));
    assert_eq!(empty["healthAlert"], json!("SAFE"));
    assert_eq!(empty["dataAvailable"], json!(false));
}

#[tokio::test]
async fn unknown_destination_is_not_found() {
    let mut providers =
        StubProviders::with_routes(vec![route_at(100.5, 5_000.0)], vec![(100.5, 10.0)]);
    providers.destination = None;
    let app = setup_app(providers.clone());

    let response = app
        .oneshot(post_json(
            "/v1/routes/pm25",
            json!({"startLat": 13.7, "startLng": 100.5, "destination": "Atlantis"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["error"], json!("destination not found: Atlantis"));
    assert_eq!(providers.calls.geocode.load(Ordering::SeqCst), 1);
    assert_eq!(providers.calls.routes.load(Ordering::SeqCst), 0);
    assert_eq!(providers.calls.samples.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn destination_text_is_geocoded() {
    let providers =
        StubProviders::with_routes(vec![route_at(100.5, 5_000.0)], vec![(100.5, 10.0)]);
    let app = setup_app(providers.clone());

    let response = app
        .oneshot(post_json(
            "/v1/routes/pm25",
            json!({"startLat": 13.7, "startLng": 100.5, "destination": "Siam Paragon"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(providers.calls.geocode.load(Ordering::SeqCst), 1);
    assert_eq!(providers.calls.routes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_route_list_is_not_found() {
    let app = setup_app(StubProviders::with_routes(Vec::new(), Vec::new()));
    let response = app
        .oneshot(post_json(
            "/v1/routes/pm25",
            json!({"startLat": 13.7, "startLng": 100.5, "endLat": 13.9, "endLng": 100.6}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("no route"));
}

#[tokio::test]
async fn route_provider_outage_is_bad_gateway() {
    let mut providers = StubProviders::with_routes(Vec::new(), Vec::new());
    providers.routes = Err(ProviderError::Status {
        status: 503,
        body: "maintenance".to_string(),
    });
    let app = setup_app(providers);

    let response = app
        .oneshot(post_json(
            "/v1/routes/pm25",
            json!({"startLat": 13.7, "startLng": 100.5, "endLat": 13.9, "endLng": 100.6}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = read_json(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("route provider unavailable"));
}

#[tokio::test]
async fn missing_coordinates_are_rejected() {
    let app = setup_app(StubProviders::with_routes(Vec::new(), Vec::new()));
    let response = app
        .oneshot(post_json("/v1/routes/pm25", json!({"startLat": 13.7})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_json_gets_error_body() {
    let app = setup_app(StubProviders::with_routes(Vec::new(), Vec::new()));
    let request = Request::builder()
        .method("POST")
        .uri("/v1/routes/pm25")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn air_quality_reading_with_profile() {
    let providers = StubProviders::with_routes(Vec::new(), vec![(100.5018, 45.4)]);
    let app = setup_app(providers);

    let response = app
        .oneshot(post_json(
            "/v1/air-quality",
            json!({"latitude": 13.7563, "longitude": 100.5018, "conditions": ["asthma"]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;

    assert_eq!(body["pm25"], json!(45));
    assert_eq!(body["temperature"], json!(30));
    assert_eq!(body["humidity"], json!(65));
    assert_eq!(body["location"], json!("Bang Rak, Bangkok, Thailand"));
    assert_eq!(body["advice"]["level"], json!("unhealthy_for_sensitive"));
    assert!(body["advice"]["sensitiveGroupWarning"].is_string());
    assert_eq!(body["notification"]["severity"], json!("high"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn air_quality_outage_is_bad_gateway() {
    let app = setup_app(StubProviders::with_routes(Vec::new(), Vec::new()));
    let response = app
        .oneshot(post_json(
            "/v1/air-quality",
            json!({"latitude": 13.7563, "longitude": 100.5018}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn advice_endpoint_bands_values() {
    let app = setup_app(StubProviders::with_routes(Vec::new(), Vec::new()));

    let response = app
        .clone()
        .oneshot(post_json("/v1/advice", json!({"pm25": 20})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["advice"]["level"], json!("good"));
    assert!(body.get("notification").is_none());

    let response = app
        .oneshot(post_json(
            "/v1/advice",
            json!({"pm25": 120, "conditions": ["elderly"], "location": "Chiang Mai"}),
        ))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["advice"]["level"], json!("hazardous"));
    assert_eq!(body["notification"]["severity"], json!("hazardous"));
}

#[tokio::test]
async fn negative_pm25_is_rejected() {
    let app = setup_app(StubProviders::with_routes(Vec::new(), Vec::new()));
    let response = app
        .oneshot(post_json("/v1/advice", json!({"pm25": -4})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn caller_request_id_is_echoed() {
    let app = setup_app(StubProviders::with_routes(Vec::new(), Vec::new()));
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("req-123")
    );
}

#[tokio::test]
async fn error_responses_get_generated_request_id() {
    let app = setup_app(StubProviders::with_routes(Vec::new(), Vec::new()));
    let response = app
        .oneshot(post_json("/v1/routes/pm25", json!({"startLat": 13.7})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("request id header");
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn rate_limit_applies_to_provider_routes() {
    let mut config = Config::from_env();
    config.rate_limit_enabled = true;
    config.rate_limit_rps = 1;
    let providers =
        StubProviders::with_routes(vec![route_at(100.5, 3_000.0)], vec![(100.5, 10.0)]);
    let state = Arc::new(AppState::new(providers));
    let app = api::routes(&config).with_state(state);

    let body = json!({"startLat": 13.7, "startLng": 100.5, "endLat": 13.9, "endLng": 100.6});
    let first = app
        .clone()
        .oneshot(post_json("/v1/routes/pm25", body.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(post_json("/v1/routes/pm25", body))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
}
