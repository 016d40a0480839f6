use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failure reading walkshed configuration: {source}")]
    ConfigCrateError {
        #[from]
        source: ::config::ConfigError,
    },
    #[error("invalid walkshed configuration: {0}")]
    InvalidConfiguration(String),
}
