mod join_error;
mod join_outcome;
mod partition;
mod spatial_join;

pub use join_error::JoinError;
pub use join_outcome::JoinOutcome;
pub use partition::Partition;
pub use spatial_join::{join_files, spatial_join, JoinPartition};
