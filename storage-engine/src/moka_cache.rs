use async_trait::async_trait;
use geocache::domain::CachedRecord;
use geocache::ports::{CacheStore, Clock, SystemClock};
use moka::future::Cache;
use shared::{Result, TtlSecs};
use std::sync::Arc;

/// Moka-based in-memory cache store
/// Records keep their `expiresAt` stamp but are not evicted by it; the
/// resolver decides whether an expired record still counts as a hit
pub struct MokaCacheStore {
    cache: Cache<String, CachedRecord>,
    clock: Arc<dyn Clock>,
}

impl MokaCacheStore {
    /// Create a new Moka store, optionally bounded to `max_entries`
    pub fn new(max_entries: Option<u64>) -> Self {
        Self::with_clock(max_entries, Arc::new(SystemClock))
    }

    pub fn with_clock(max_entries: Option<u64>, clock: Arc<dyn Clock>) -> Self {
        let mut builder = Cache::builder().name("geocoding_cache");

        if let Some(capacity) = max_entries {
            builder = builder.max_capacity(capacity);
        }

        Self {
            cache: builder.build(),
            clock,
        }
    }
}

#[async_trait]
impl CacheStore for MokaCacheStore {
    async fn get(&self, address: &str) -> Result<Option<CachedRecord>> {
        Ok(self.cache.get(address).await)
    }

    async fn put(
        &self,
        address: &str,
        response_json: String,
        ttl: TtlSecs,
    ) -> Result<CachedRecord> {
        let record = CachedRecord::new(address, response_json, self.clock.now_unix(), ttl);
        self.cache.insert(address.to_string(), record.clone()).await;
        Ok(record)
    }
}

impl std::fmt::Debug for MokaCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheStore")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}
