mod coordinate_system;
mod projection_error;
pub mod utm;
pub mod web_mercator;

pub use coordinate_system::Projection;
pub use projection_error::ProjectionError;
