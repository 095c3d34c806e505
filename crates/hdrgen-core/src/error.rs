//! Error types for hdrgen

use thiserror::Error;

/// hdrgen error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Error reading file {path}")]
    SourceRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result type alias for hdrgen
pub type Result<T> = std::result::Result<T, Error>;
