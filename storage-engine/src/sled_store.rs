use async_trait::async_trait;
use geocache::domain::CachedRecord;
use geocache::ports::{CacheStore, Clock, SystemClock};
use serde::Deserialize;
use shared::{Error, Result, TtlSecs};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const CACHE_TREE: &str = "geocoding_cache";

/// Lenient view of a stored document. A record without `responseJson`
/// reads as a miss rather than an error.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDocument {
    address: Option<String>,
    response_json: Option<String>,
    expires_at: Option<i64>,
}

/// Sled-backed durable cache store keyed by the raw address bytes
pub struct SledCacheStore {
    db: sled::Db,
    tree: sled::Tree,
    clock: Arc<dyn Clock>,
}

impl SledCacheStore {
    /// Open (or create) the store at `path`
    /// Creates the parent directory if it doesn't exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_clock(path, Arc::new(SystemClock))
    }

    pub fn open_with_clock(path: impl AsRef<Path>, clock: Arc<dyn Clock>) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::StoreUnavailable(format!("Failed to create directory: {}", e)))?;
        }

        let db = sled::open(path)
            .map_err(|e| Error::StoreUnavailable(format!("Failed to open Sled database: {}", e)))?;
        let tree = db
            .open_tree(CACHE_TREE)
            .map_err(|e| Error::StoreUnavailable(format!("Failed to open cache tree: {}", e)))?;

        Ok(Self { db, tree, clock })
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

#[async_trait]
impl CacheStore for SledCacheStore {
    async fn get(&self, address: &str) -> Result<Option<CachedRecord>> {
        let value = self
            .tree
            .get(address.as_bytes())
            .map_err(|e| Error::StoreUnavailable(format!("Failed to read record: {}", e)))?;

        let Some(bytes) = value else {
            return Ok(None);
        };

        let doc: StoredDocument =
            serde_json::from_slice(&bytes).map_err(|e| Error::CacheCorruption {
                address: address.to_string(),
                reason: format!("stored record is not a JSON document: {}", e),
            })?;

        let Some(response_json) = doc.response_json else {
            debug!(address, "Stored record has no payload, treating as miss");
            return Ok(None);
        };

        Ok(Some(CachedRecord {
            address: doc.address.unwrap_or_else(|| address.to_string()),
            response_json,
            // Without an expiry stamp the record is considered stale
            expires_at: doc.expires_at.unwrap_or(0),
        }))
    }

    async fn put(
        &self,
        address: &str,
        response_json: String,
        ttl: TtlSecs,
    ) -> Result<CachedRecord> {
        let record = CachedRecord::new(address, response_json, self.clock.now_unix(), ttl);
        let value = serde_json::to_vec(&record)
            .map_err(|e| Error::Internal(format!("Failed to serialize record: {}", e)))?;

        self.tree
            .insert(address.as_bytes(), value)
            .map_err(|e| Error::StoreUnavailable(format!("Failed to save record: {}", e)))?;

        self.tree
            .flush_async()
            .await
            .map_err(|e| Error::StoreUnavailable(format!("Failed to flush database: {}", e)))?;

        Ok(record)
    }
}

impl std::fmt::Debug for SledCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledCacheStore")
            .field("tree", &CACHE_TREE)
            .field("entries", &self.tree.len())
            .field("size_on_disk", &self.db.size_on_disk().ok())
            .finish()
    }
}
