// shared/src/lib.rs

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("no results found for address: {0}")]
    NoResultsFound(String),
    #[error("geocode provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("cache store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("cache corruption for address {address}: {reason}")]
    CacheCorruption { address: String, reason: String },
    #[error("configuration: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Time-to-live expressed in whole seconds, matching the unix-seconds
/// `expiresAt` stamp persisted alongside each cache record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtlSecs(pub u64);

impl TtlSecs {
    const SECS_PER_DAY: u64 = 24 * 60 * 60;

    pub fn from_days(days: u64) -> Self {
        Self(days.saturating_mul(Self::SECS_PER_DAY))
    }

    /// `None` when the day count does not fit in seconds.
    pub fn checked_from_days(days: u64) -> Option<Self> {
        days.checked_mul(Self::SECS_PER_DAY).map(Self)
    }

    pub fn as_secs_i64(&self) -> i64 {
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }
}

pub mod config;
