use thiserror::Error;

use crate::projection::ProjectionError;

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("failure reading file {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },
    #[error("failure writing file {path}: {source}")]
    WriteError {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to read file {0} as GeoJSON: {1}")]
    InvalidGeoJson(String, String),
    #[error("GeoJSON must be a FeatureCollection but found single '{1}' in file {0}")]
    NotAFeatureCollection(String, String),
    #[error("unsupported coordinate reference system {0}")]
    UnsupportedCrs(String),
    #[error("failure reprojecting collection: {source}")]
    ProjectionError {
        #[from]
        source: ProjectionError,
    },
    #[error("failure encoding GeoJSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
}
