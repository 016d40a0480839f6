mod cli_error;
mod walkshed_app;

pub use cli_error::WalkshedCliError;
pub use walkshed_app::{WalkshedApp, WalkshedOperation};
