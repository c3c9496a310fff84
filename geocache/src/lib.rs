//! Cache-aside address geocoding: consult the cache store, fall back to the
//! geocode provider on a miss, and write the answer back.

pub mod domain;
pub mod ports;
pub mod resolver;

pub use domain::{Address, CachedRecord, Coordinate, LookupResult, Source};
pub use ports::{CacheStore, Clock, GeocodeProvider, SystemClock};
pub use resolver::{CoordinateLookup, CoordinateResolver, ResolverConfig, ResolverStats};

#[cfg(test)]
pub(crate) mod testing;
