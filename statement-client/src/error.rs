use std::path::PathBuf;
use thiserror::Error;

/// Failure of a request to the statement backend.
///
/// `Display` is what the screen shows: the backend's own message for
/// `Server`, the transport error text otherwise.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Server(String),

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    pub fn is_server(&self) -> bool {
        matches!(self, ApiError::Server(_))
    }
}
