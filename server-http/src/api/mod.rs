pub mod requests;
pub mod responses;

pub use requests::CoordinatesQuery;
pub use responses::{ErrorResponse, HealthResponse};
