use thiserror::Error;
use walkshed_core::collection::CollectionError;

use crate::model::scan::ScanError;

#[derive(Error, Debug)]
pub enum ReachableTreeError {
    #[error("reachable tree request failed: {source}")]
    HttpError {
        #[from]
        source: reqwest::Error,
    },
    #[error("reachable tree query rejected: {0}")]
    ValidationError(String),
    #[error("reachable tree service returned status {0}: {1}")]
    StatusError(u16, String),
    #[error("no results were returned from the reachable tree service: {0}")]
    NoResults(String),
    #[error("invalid reachable tree response: {0}")]
    InvalidResponse(String),
    #[error("failure writing reachable tree: {source}")]
    CollectionError {
        #[from]
        source: CollectionError,
    },
    #[error("failure writing reachable tree metadata: {source}")]
    ScanError {
        #[from]
        source: ScanError,
    },
    #[error("failure preparing output directory {path}: {source}")]
    OutputDirectoryError {
        path: String,
        source: std::io::Error,
    },
}
