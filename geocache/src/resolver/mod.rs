pub mod coordinate_resolver;
pub mod operation;

pub use coordinate_resolver::{CoordinateResolver, ResolverConfig};
pub use operation::{CoordinateLookup, ResolverStats};
