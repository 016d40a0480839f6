use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failure listing directory {path}: {source}")]
    ReadDirError {
        path: String,
        source: std::io::Error,
    },
    #[error("file name '{0}' does not follow the naming convention: {1}")]
    InvalidFileName(String, String),
    #[error("failure reading descriptor {path}: {source}")]
    DescriptorReadError {
        path: String,
        source: std::io::Error,
    },
    #[error("failure writing descriptor {path}: {source}")]
    DescriptorWriteError {
        path: String,
        source: std::io::Error,
    },
    #[error("failure encoding or decoding descriptor {path}: {source}")]
    DescriptorJsonError {
        path: String,
        source: serde_json::Error,
    },
}
