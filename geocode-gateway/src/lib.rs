//! Geocode Provider adapters.

pub mod google;

pub use google::{GoogleGeocodeClient, GoogleGeocodeConfig};
