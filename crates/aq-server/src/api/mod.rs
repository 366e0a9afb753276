//! API routes for the air-quality server.

pub mod error;
pub mod rate_limit;
pub mod request_id;
mod routes;

use crate::config::Config;
use crate::state::{AdvisoryProviders, AppState};
use axum::Router;
use std::sync::Arc;

pub fn routes<P: AdvisoryProviders>(config: &Config) -> Router<Arc<AppState<P>>> {
    routes::create_router(config)
}

#[cfg(test)]
mod tests;
