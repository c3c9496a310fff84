pub mod moka_cache;
pub mod sled_store;

pub use moka_cache::MokaCacheStore;
pub use sled_store::SledCacheStore;

use geocache::ports::CacheStore;
use shared::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Selects the Cache Store adapter the resolver is wired with
#[derive(Clone, Debug)]
pub enum StoreBackend {
    /// Durable sled database at the given path
    Sled(PathBuf),
    /// Process-local store, lost on restart
    Memory { max_entries: Option<u64> },
}

pub fn open_store(backend: &StoreBackend) -> Result<Arc<dyn CacheStore>> {
    match backend {
        StoreBackend::Sled(path) => {
            tracing::info!("Opening sled cache store at {}", path.display());
            Ok(Arc::new(SledCacheStore::open(path)?))
        }
        StoreBackend::Memory { max_entries } => {
            tracing::info!("Using in-memory cache store");
            Ok(Arc::new(MokaCacheStore::new(*max_entries)))
        }
    }
}
