mod buffer_config;
mod buffer_error;
mod buffer_ops;

pub use buffer_config::BufferConfig;
pub use buffer_error::BufferError;
pub use buffer_ops::{buffer_collection, buffer_geometry};
