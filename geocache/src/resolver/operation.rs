use crate::domain::LookupResult;
use async_trait::async_trait;
use shared::Result;

/// Point-in-time snapshot of lookup counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub expired_records: u64,
    pub cache_write_failures: u64,
}

/// Application-level lookup entry point used by the request host
#[async_trait]
pub trait CoordinateLookup: Send + Sync + 'static {
    async fn lookup(&self, address: &str) -> Result<LookupResult>;

    fn stats(&self) -> ResolverStats;
}
