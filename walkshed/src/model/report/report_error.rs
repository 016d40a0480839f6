use thiserror::Error;
use walkshed_core::collection::CollectionError;

use crate::model::scan::ScanError;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failure reading report {path}: {source}")]
    ReadError { path: String, source: csv::Error },
    #[error("failure writing report {path}: {source}")]
    WriteError { path: String, source: csv::Error },
    #[error("failure replacing report {path}: {source}")]
    PersistError {
        path: String,
        source: std::io::Error,
    },
    #[error("report {0} already exists")]
    ReportExists(String),
    #[error("location '{0}' is not configured")]
    UnknownLocation(String),
    #[error("profile '{0}' is not configured")]
    UnknownProfile(String),
    #[error("profile '{profile}' has rank {rank}, which must be in [1, {block_size})")]
    RankOutsideBlock {
        profile: String,
        rank: usize,
        block_size: usize,
    },
    #[error("no report column for category '{category}' in header columns {first}..={last}")]
    CategoryColumnMissing {
        category: String,
        first: usize,
        last: usize,
    },
    #[error("report has room for {capacity} categories but {count} were given")]
    TooManyCategories { count: usize, capacity: usize },
    #[error("invalid report layout: {0}")]
    InvalidLayout(String),
    #[error("failure counting artifact features: {source}")]
    CollectionError {
        #[from]
        source: CollectionError,
    },
    #[error("failure reading artifact metadata: {source}")]
    ScanError {
        #[from]
        source: ScanError,
    },
}
