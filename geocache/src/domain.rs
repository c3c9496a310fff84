use serde::{Deserialize, Serialize};
use shared::{Error, Result, TtlSecs};
use std::fmt;

/// Validity window stamped on every freshly written cache record.
pub const DEFAULT_CACHE_TTL_DAYS: u64 = 30;

pub fn default_cache_ttl() -> TtlSecs {
    TtlSecs::from_days(DEFAULT_CACHE_TTL_DAYS)
}

/// Caller-supplied address, used verbatim as the cache key.
///
/// Only blank input is rejected; no trimming, case folding or other
/// canonicalisation is applied to the stored value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(Error::InvalidRequest(
                "address must not be empty".to_string(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A latitude/longitude pair passed through exactly as the provider returned it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(alias = "Lat")]
    pub lat: f64,
    #[serde(alias = "Lng")]
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Serialized payload stored in the `responseJson` field of a cache record.
    pub fn to_payload(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| Error::Internal(format!("Failed to serialize coordinate: {}", e)))
    }

    pub fn from_payload(address: &str, payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| Error::CacheCorruption {
            address: address.to_string(),
            reason: format!("stored payload is not a coordinate: {}", e),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Cache,
    Provider,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Cache => "cache",
            Source::Provider => "provider",
        }
    }
}

/// What a lookup hands back to the caller; mirrors the HTTP response body.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    pub lat: f64,
    pub lng: f64,
    pub source: Source,
}

impl LookupResult {
    pub fn new(coordinate: Coordinate, source: Source) -> Self {
        Self {
            lat: coordinate.lat,
            lng: coordinate.lng,
            source,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// Persisted cache record. `expires_at` is unix seconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedRecord {
    pub address: String,
    pub response_json: String,
    pub expires_at: i64,
}

impl CachedRecord {
    pub fn new(address: impl Into<String>, response_json: String, now: i64, ttl: TtlSecs) -> Self {
        Self {
            address: address.into(),
            response_json,
            expires_at: now.saturating_add(ttl.as_secs_i64()),
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}
