//! Google Geocoding API client.
//!
//! One GET per call, no retries. Only the first result is used.

use async_trait::async_trait;
use geocache::domain::Coordinate;
use geocache::ports::GeocodeProvider;
use reqwest::Url;
use serde::Deserialize;
use shared::config::DEFAULT_GEOCODE_ENDPOINT;
use shared::{Error, Result};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Statuses Google reports for requests it refused or failed to serve.
const FAILURE_STATUSES: &[&str] = &[
    "REQUEST_DENIED",
    "OVER_QUERY_LIMIT",
    "OVER_DAILY_LIMIT",
    "INVALID_REQUEST",
    "UNKNOWN_ERROR",
];

#[derive(Clone)]
pub struct GoogleGeocodeConfig {
    pub endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl GoogleGeocodeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_GEOCODE_ENDPOINT.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Keeps the API key out of logs
impl std::fmt::Debug for GoogleGeocodeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleGeocodeConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

/// HTTP client for the Google Geocoding API
pub struct GoogleGeocodeClient {
    endpoint: Url,
    api_key: String,
    http_client: reqwest::Client,
}

impl GoogleGeocodeClient {
    pub fn new(config: GoogleGeocodeConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::Config("geocode API key must not be empty".to_string()));
        }

        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            Error::Config(format!("invalid geocode endpoint '{}': {}", config.endpoint, e))
        })?;

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            api_key: config.api_key,
            http_client,
        })
    }

    fn request_url(&self, address: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("key", &self.api_key);
        url
    }
}

#[async_trait]
impl GeocodeProvider for GoogleGeocodeClient {
    #[instrument(skip(self))]
    async fn resolve(&self, address: &str) -> Result<Coordinate> {
        let response = self
            .http_client
            .get(self.request_url(address))
            .send()
            .await
            .map_err(|e| {
                // Error text would otherwise carry the full URL, key included
                let e = e.without_url();
                warn!("Geocode request failed: {}", e);
                Error::ProviderUnavailable(format!("request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Geocode provider returned non-success status");
            return Err(Error::ProviderUnavailable(format!(
                "provider responded with status {}",
                status
            )));
        }

        let body: GeocodeResponse = response.json().await.map_err(|e| {
            Error::ProviderUnavailable(format!("unreadable provider response: {}", e.without_url()))
        })?;

        first_location(address, body)
    }
}

fn first_location(address: &str, body: GeocodeResponse) -> Result<Coordinate> {
    if let Some(status) = body.status.as_deref() {
        if FAILURE_STATUSES.contains(&status) {
            let detail = body.error_message.unwrap_or_default();
            warn!(status, detail = %detail, "Geocode provider refused request");
            return Err(Error::ProviderUnavailable(format!("{} {}", status, detail)));
        }
    }

    let Some(first) = body.results.into_iter().next() else {
        debug!("Geocode provider returned zero results");
        return Err(Error::NoResultsFound(address.to_string()));
    };

    let location = first
        .geometry
        .map(|g| g.location)
        .ok_or_else(|| Error::ProviderUnavailable("first result has no geometry".to_string()))?;

    Ok(Coordinate::new(location.lat, location.lng))
}
