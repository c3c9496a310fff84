pub mod coordinates;
pub mod health;

pub use coordinates::get_coordinates;
pub use health::health_check;
