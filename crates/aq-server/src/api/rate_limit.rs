//! Per-client rate limiting for endpoints that fan out to providers.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use dashmap::DashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(1);

/// Sliding one-second window per client IP.
#[derive(Clone)]
pub struct RateLimiter {
    requests: Arc<DashMap<String, Vec<Instant>>>,
    last_cleanup: Arc<Mutex<Instant>>,
    cleanup_interval: Duration,
    max_rps: u32,
    enabled: bool,
    trust_proxy: bool,
}

impl RateLimiter {
    pub fn new(max_rps: u32, enabled: bool, trust_proxy: bool) -> Self {
        Self {
            requests: Arc::new(DashMap::new()),
            last_cleanup: Arc::new(Mutex::new(Instant::now())),
            cleanup_interval: Duration::from_secs(60),
            max_rps,
            enabled,
            trust_proxy,
        }
    }

    /// Returns true if the request from `ip` may proceed.
    pub fn check(&self, ip: &str) -> bool {
        if !self.enabled {
            return true;
        }

        let now = Instant::now();
        let do_cleanup = match self.last_cleanup.lock() {
            Ok(mut last_cleanup) if now.duration_since(*last_cleanup) >= self.cleanup_interval => {
                *last_cleanup = now;
                true
            }
            _ => false,
        };
        if do_cleanup {
            self.purge_stale_entries(now);
        }

        let mut entry = self.requests.entry(ip.to_string()).or_default();
        let timestamps = entry.value_mut();
        timestamps.retain(|t| now.duration_since(*t) < WINDOW);

        if timestamps.len() < self.max_rps as usize {
            timestamps.push(now);
            true
        } else {
            false
        }
    }

    fn purge_stale_entries(&self, now: Instant) {
        self.requests
            .retain(|_, timestamps| timestamps.iter().any(|t| now.duration_since(*t) < WINDOW));
    }

    fn client_ip(&self, request: &Request) -> String {
        let forwarded = if self.trust_proxy {
            request
                .headers()
                .get("X-Forwarded-For")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.split(',').next())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        } else {
            None
        };

        forwarded
            .or_else(|| {
                request
                    .extensions()
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|info| info.0.ip().to_string())
            })
            .unwrap_or_else(|| "unknown".to_string())
    }
}

pub async fn rate_limit(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let ip = limiter.client_ip(&request);
    if limiter.check(&ip) {
        next.run(request).await
    } else {
        tracing::info!("Rate limit exceeded for {}", ip);
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({
                "error": "Rate limit exceeded, retry after 1 second"
            })),
        )
            .into_response()
    }
}
