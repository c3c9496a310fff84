use crate::domain::{default_cache_ttl, Address, Coordinate, LookupResult, Source};
use crate::ports::{CacheStore, Clock, GeocodeProvider, SystemClock};
use crate::resolver::operation::{CoordinateLookup, ResolverStats};
use async_trait::async_trait;
use shared::{Result, TtlSecs};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Clone, Copy, Debug)]
pub struct ResolverConfig {
    pub cache_ttl: TtlSecs,
    /// Treat records whose `expiresAt` has passed as misses.
    pub enforce_expiry: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_ttl: default_cache_ttl(),
            enforce_expiry: true,
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    expired_records: AtomicU64,
    cache_write_failures: AtomicU64,
}

/// Cache-aside orchestrator: cache store first, geocode provider on a miss,
/// then a best-effort write back into the store.
///
/// Holds no per-request state; one instance is shared by all in-flight
/// requests and identical concurrent misses are not deduplicated.
pub struct CoordinateResolver {
    store: Arc<dyn CacheStore>,
    provider: Arc<dyn GeocodeProvider>,
    clock: Arc<dyn Clock>,
    config: ResolverConfig,
    counters: Counters,
}

enum CacheCheck {
    Hit(Coordinate),
    Miss,
}

impl CoordinateResolver {
    pub fn new(store: Arc<dyn CacheStore>, provider: Arc<dyn GeocodeProvider>) -> Self {
        Self::with_config(store, provider, ResolverConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn CacheStore>,
        provider: Arc<dyn GeocodeProvider>,
        config: ResolverConfig,
    ) -> Self {
        Self::with_clock(store, provider, Arc::new(SystemClock), config)
    }

    pub fn with_clock(
        store: Arc<dyn CacheStore>,
        provider: Arc<dyn GeocodeProvider>,
        clock: Arc<dyn Clock>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            store,
            provider,
            clock,
            config,
            counters: Counters::default(),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn stats(&self) -> ResolverStats {
        ResolverStats {
            cache_hits: self.counters.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.counters.cache_misses.load(Ordering::Relaxed),
            expired_records: self.counters.expired_records.load(Ordering::Relaxed),
            cache_write_failures: self.counters.cache_write_failures.load(Ordering::Relaxed),
        }
    }

    async fn check_cache(&self, address: &Address) -> Result<CacheCheck> {
        let Some(record) = self.store.get(address.as_str()).await? else {
            return Ok(CacheCheck::Miss);
        };

        // A payload that does not decode is surfaced, never re-resolved,
        // even when the record has already expired.
        let coordinate = Coordinate::from_payload(address.as_str(), &record.response_json)?;

        if self.config.enforce_expiry && record.is_expired(self.clock.now_unix()) {
            debug!(expires_at = record.expires_at, "Cached record expired");
            self.counters.expired_records.fetch_add(1, Ordering::Relaxed);
            return Ok(CacheCheck::Miss);
        }

        Ok(CacheCheck::Hit(coordinate))
    }

    /// Failures here are logged and counted but never fail the request.
    async fn write_back(&self, address: &Address, coordinate: &Coordinate) {
        let outcome = match coordinate.to_payload() {
            Ok(payload) => self
                .store
                .put(address.as_str(), payload, self.config.cache_ttl)
                .await
                .map(|record| record.expires_at),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(expires_at) => debug!(expires_at, "Cached provider result"),
            Err(e) => {
                let failures = self
                    .counters
                    .cache_write_failures
                    .fetch_add(1, Ordering::Relaxed)
                    + 1;
                warn!(
                    error = %e,
                    total_failures = failures,
                    "Failed to write geocode result to cache"
                );
            }
        }
    }
}

#[async_trait]
impl CoordinateLookup for CoordinateResolver {
    #[instrument(skip(self))]
    async fn lookup(&self, address: &str) -> Result<LookupResult> {
        let address = Address::parse(address)?;

        if let CacheCheck::Hit(coordinate) = self.check_cache(&address).await? {
            debug!("Cache hit");
            self.counters.cache_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(LookupResult::new(coordinate, Source::Cache));
        }

        debug!("Cache miss, resolving with provider");
        self.counters.cache_misses.fetch_add(1, Ordering::Relaxed);

        let coordinate = self.provider.resolve(address.as_str()).await?;
        info!(lat = coordinate.lat, lng = coordinate.lng, "Resolved address");

        self.write_back(&address, &coordinate).await;

        Ok(LookupResult::new(coordinate, Source::Provider))
    }

    fn stats(&self) -> ResolverStats {
        CoordinateResolver::stats(self)
    }
}

impl std::fmt::Debug for CoordinateResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordinateResolver")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}
