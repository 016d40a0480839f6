use thiserror::Error;

#[derive(Error, Debug)]
pub enum BufferError {
    #[error("buffer distance must be a positive finite number, found {0}")]
    InvalidDistance(f64),
    #[error("buffer needs at least one segment per quarter circle, found {0}")]
    InvalidSegments(u32),
}
