//! Server configuration from environment.

use std::env;
use std::time::Duration;

use aq_providers::ProviderConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub geocoding_url: String,
    pub geocoding_language: String,
    pub routing_url: String,
    pub routing_profile: String,
    pub air_quality_url: String,
    pub air_quality_domains: String,
    pub weather_url: String,
    pub reverse_geocoding_url: String,
    pub user_agent: String,
    pub provider_timeout_s: u64,
    pub rate_limit_enabled: bool,
    pub rate_limit_rps: u32,
    pub trust_proxy: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = ProviderConfig::default();
        Self {
            server_port: env::var("AQ_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            geocoding_url: env::var("AQ_GEOCODING_URL").unwrap_or(defaults.geocoding_url),
            geocoding_language: env::var("AQ_GEOCODING_LANGUAGE")
                .unwrap_or(defaults.geocoding_language),
            routing_url: env::var("AQ_ROUTING_URL").unwrap_or(defaults.routing_url),
            routing_profile: env::var("AQ_ROUTING_PROFILE").unwrap_or(defaults.routing_profile),
            air_quality_url: env::var("AQ_AIR_QUALITY_URL").unwrap_or(defaults.air_quality_url),
            air_quality_domains: env::var("AQ_AIR_QUALITY_DOMAINS")
                .unwrap_or(defaults.air_quality_domains),
            weather_url: env::var("AQ_WEATHER_URL").unwrap_or(defaults.weather_url),
            reverse_geocoding_url: env::var("AQ_REVERSE_GEOCODING_URL")
                .unwrap_or(defaults.reverse_geocoding_url),
            user_agent: env::var("AQ_USER_AGENT").unwrap_or(defaults.user_agent),
            provider_timeout_s: env::var("AQ_PROVIDER_TIMEOUT_S")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout.as_secs()),
            rate_limit_enabled: env::var("AQ_RATE_LIMIT_ENABLED")
                .map(|s| s != "false" && s != "0")
                .unwrap_or(true),
            rate_limit_rps: env::var("AQ_RATE_LIMIT_RPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            trust_proxy: env::var("AQ_TRUST_PROXY")
                .map(|s| s == "true" || s == "1")
                .unwrap_or(false),
        }
    }

    /// Settings handed to the provider adapters.
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            geocoding_url: self.geocoding_url.clone(),
            geocoding_language: self.geocoding_language.clone(),
            routing_url: self.routing_url.clone(),
            routing_profile: self.routing_profile.clone(),
            air_quality_url: self.air_quality_url.clone(),
            air_quality_domains: self.air_quality_domains.clone(),
            weather_url: self.weather_url.clone(),
            reverse_geocoding_url: self.reverse_geocoding_url.clone(),
            user_agent: self.user_agent.clone(),
            request_timeout: Duration::from_secs(self.provider_timeout_s.max(1)),
        }
    }
}
