mod config_error;
mod location_config;
mod profile_config;
mod walkshed_config;

pub use config_error::ConfigError;
pub use location_config::{LocationConfig, Origin};
pub use profile_config::ProfileConfig;
pub use walkshed_config::{ReachableTreeConfig, ReprojectConfig, WalkshedConfig};
