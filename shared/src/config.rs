use crate::{Error, Result, TtlSecs};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Which Cache Store adapter backs the resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Sled,
    Memory,
}

pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub data_dir: PathBuf,
    pub store: StoreKind,
    pub cache_ttl: TtlSecs,
    pub enforce_expiry: bool,
    pub geocode_endpoint: String,
    pub geocode_api_key: String,
    pub geocode_timeout: Duration,
}

impl Config {
    const DEFAULT_HOST: &str = "0.0.0.0";
    const DEFAULT_HTTP_PORT: u16 = 8080;
    const DEFAULT_DATA_DIR: &str = "./data";
    const DEFAULT_TTL_DAYS: u64 = 30;
    const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Load configuration from the process environment.
    /// Fails when `GOOGLE_MAPS_API_KEY` is missing so the server never starts
    /// without provider credentials.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let geocode_api_key = lookup("GOOGLE_MAPS_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::Config("GOOGLE_MAPS_API_KEY is not set".to_string()))?;

        let http_port = parse_or(&lookup, "GEOCACHE_HTTP_PORT", Self::DEFAULT_HTTP_PORT);
        let ttl_days = parse_or(&lookup, "GEOCACHE_CACHE_TTL_DAYS", Self::DEFAULT_TTL_DAYS);
        let timeout_secs = parse_or(&lookup, "GEOCODE_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS);
        let enforce_expiry = parse_or(&lookup, "GEOCACHE_ENFORCE_EXPIRY", true);

        if ttl_days == 0 {
            return Err(Error::Config(
                "GEOCACHE_CACHE_TTL_DAYS must be at least 1".to_string(),
            ));
        }
        let cache_ttl = TtlSecs::checked_from_days(ttl_days).ok_or_else(|| {
            Error::Config(format!(
                "GEOCACHE_CACHE_TTL_DAYS value {} is too large",
                ttl_days
            ))
        })?;

        let store = match lookup("GEOCACHE_STORE").as_deref().map(str::trim) {
            None | Some("") | Some("sled") => StoreKind::Sled,
            Some("memory") => StoreKind::Memory,
            Some(other) => {
                return Err(Error::Config(format!(
                    "GEOCACHE_STORE must be 'sled' or 'memory', got '{}'",
                    other
                )));
            }
        };

        Ok(Self {
            host: lookup("GEOCACHE_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            http_port,
            data_dir: PathBuf::from(
                lookup("GEOCACHE_DATA_DIR").unwrap_or_else(|| Self::DEFAULT_DATA_DIR.to_string()),
            ),
            store,
            cache_ttl,
            enforce_expiry,
            geocode_endpoint: lookup("GEOCODE_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_GEOCODE_ENDPOINT.to_string()),
            geocode_api_key,
            geocode_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    pub fn cache_path(&self) -> PathBuf {
        self.data_dir.join("geocoding_cache.sled")
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            warn!("{} has unparseable value '{}', using default", name, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_missing_api_key_fails_fast() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(Error::Config(_))));

        let blank = Config::from_lookup(lookup_from(&[("GOOGLE_MAPS_API_KEY", "  ")]));
        assert!(matches!(blank, Err(Error::Config(_))));
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("GOOGLE_MAPS_API_KEY", "k")])).unwrap();
        assert_eq!(config.geocode_api_key, "k");
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.store, StoreKind::Sled);
        assert_eq!(config.cache_ttl, TtlSecs(30 * 86_400));
        assert!(config.enforce_expiry);
        assert_eq!(config.geocode_endpoint, DEFAULT_GEOCODE_ENDPOINT);
        assert_eq!(config.geocode_timeout, Duration::from_secs(10));
        assert_eq!(
            config.cache_path(),
            PathBuf::from("./data").join("geocoding_cache.sled")
        );
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("GOOGLE_MAPS_API_KEY", "k"),
            ("GEOCACHE_HTTP_PORT", "9090"),
            ("GEOCACHE_STORE", "memory"),
            ("GEOCACHE_CACHE_TTL_DAYS", "7"),
            ("GEOCACHE_ENFORCE_EXPIRY", "false"),
            ("GEOCODE_TIMEOUT_SECS", "not-a-number"),
        ]))
        .unwrap();

        assert_eq!(config.http_port, 9090);
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.cache_ttl, TtlSecs::from_days(7));
        assert!(!config.enforce_expiry);
        // Unparseable values fall back to the default
        assert_eq!(config.geocode_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_zero_ttl_days_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("GOOGLE_MAPS_API_KEY", "k"),
            ("GEOCACHE_CACHE_TTL_DAYS", "0"),
        ]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_oversized_ttl_days_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("GOOGLE_MAPS_API_KEY", "k"),
            ("GEOCACHE_CACHE_TTL_DAYS", "300000000000000"),
        ]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_unknown_store_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("GOOGLE_MAPS_API_KEY", "k"),
            ("GEOCACHE_STORE", "dynamo"),
        ]));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
