// Error types for the fact cache.
// Only InvalidArgument ever escapes get/put; the rest are logged and swallowed.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CacheError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CacheError::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
