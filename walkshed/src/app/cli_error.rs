use thiserror::Error;

use crate::{
    config::ConfigError,
    model::{
        batch_ops::BatchError, pipeline::PipelineError, reachable_tree::ReachableTreeError,
        report::ReportError,
    },
};

#[derive(Error, Debug)]
pub enum WalkshedCliError {
    #[error(transparent)]
    ConfigError {
        #[from]
        source: ConfigError,
    },
    #[error("failure fetching walksheds: {source}")]
    ReachableTreeError {
        #[from]
        source: ReachableTreeError,
    },
    #[error("batch failed: {source}")]
    BatchError {
        #[from]
        source: BatchError,
    },
    #[error("report failure: {source}")]
    ReportError {
        #[from]
        source: ReportError,
    },
    #[error("join pipeline failed: {source}")]
    PipelineError {
        #[from]
        source: PipelineError,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
