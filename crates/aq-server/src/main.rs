//! AQ Server - route air-quality scoring and health advice over HTTP.

use anyhow::Result;
use aq_providers::OpenDataProviders;
use aq_server::{api, config::Config, state::AppState};
use axum::middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("aq_server=debug".parse()?))
        .init();

    tracing::info!("Starting AQ Server...");

    let config = Config::from_env();
    let port = config.server_port;
    let providers = OpenDataProviders::new(&config.provider_config())?;
    tracing::info!(
        "Providers: routing={} air_quality={} geocoding={}",
        config.routing_url,
        config.air_quality_url,
        config.geocoding_url
    );
    let state = Arc::new(AppState::new(providers));

    // Build the app
    let app = api::routes(&config)
        .with_state(state)
        .layer(middleware::from_fn(api::request_id::ensure_request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Run server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
