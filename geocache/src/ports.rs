#![deny(clippy::all)]

use crate::domain::{CachedRecord, Coordinate};
use async_trait::async_trait;
use shared::{Result, TtlSecs};

// Ports are the pluggable extension points the resolver is wired with

/// Port for durable address -> record storage
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    /// `Ok(None)` for an absent key or a record without a payload.
    async fn get(&self, address: &str) -> Result<Option<CachedRecord>>;

    /// Unconditionally overwrite the record for `address`, stamping
    /// `expires_at = now + ttl`.
    async fn put(&self, address: &str, response_json: String, ttl: TtlSecs)
    -> Result<CachedRecord>;
}

/// Port for the upstream "address to coordinates" service
#[async_trait]
pub trait GeocodeProvider: Send + Sync + 'static {
    async fn resolve(&self, address: &str) -> Result<Coordinate>;
}

/// Source of the current time in unix seconds
pub trait Clock: Send + Sync + 'static {
    fn now_unix(&self) -> i64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}
