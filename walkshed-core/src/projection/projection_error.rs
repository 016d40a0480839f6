use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("EPSG:{0} is not supported, expected 4326, 3857, 326xx or 327xx")]
    UnsupportedEpsg(u32),
    #[error("coordinate ({0}, {1}) is outside the domain of {2}")]
    OutOfDomain(f64, f64, String),
}
