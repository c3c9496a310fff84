use geocache::{CoordinateLookup, CoordinateResolver, ResolverConfig};
use geocode_gateway::{GoogleGeocodeClient, GoogleGeocodeConfig};
use shared::config::{Config, StoreKind};
use shared::Result;
use std::sync::Arc;
use storage_engine::{open_store, StoreBackend};

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<dyn CoordinateLookup>,
}

impl AppState {
    pub fn new(lookup: Arc<dyn CoordinateLookup>) -> Self {
        Self { lookup }
    }

    /// Wire the cache store, geocode provider and resolver from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = match config.store {
            StoreKind::Sled => StoreBackend::Sled(config.cache_path()),
            StoreKind::Memory => StoreBackend::Memory { max_entries: None },
        };
        let store = open_store(&backend)?;

        let provider = GoogleGeocodeClient::new(
            GoogleGeocodeConfig::new(config.geocode_api_key.clone())
                .with_endpoint(config.geocode_endpoint.clone())
                .with_timeout(config.geocode_timeout),
        )?;

        let resolver = CoordinateResolver::with_config(
            store,
            Arc::new(provider),
            ResolverConfig {
                cache_ttl: config.cache_ttl,
                enforce_expiry: config.enforce_expiry,
            },
        );
        tracing::info!("Resolver initialized: {:?}", resolver.config());

        Ok(Self::new(Arc::new(resolver)))
    }
}
