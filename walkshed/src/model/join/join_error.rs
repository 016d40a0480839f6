use thiserror::Error;
use walkshed_core::collection::CollectionError;

use crate::model::scan::ScanError;

#[derive(Error, Debug)]
pub enum JoinError {
    #[error("failure reading or writing join collections: {source}")]
    CollectionError {
        #[from]
        source: CollectionError,
    },
    #[error("failure handling join artifact metadata: {source}")]
    ScanError {
        #[from]
        source: ScanError,
    },
    #[error("failure preparing output directory {path}: {source}")]
    OutputDirectoryError {
        path: String,
        source: std::io::Error,
    },
    #[error("failure removing stale join output {path}: {source}")]
    StaleOutputError {
        path: String,
        source: std::io::Error,
    },
}
