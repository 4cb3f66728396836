use thiserror::Error;

/// Failure to retrieve or decode a model asset
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} while fetching {locator}")]
    HttpStatus { status: u16, locator: String },

    #[error("Invalid glTF asset: {0}")]
    Gltf(#[from] gltf::Error),

    #[error("Failed to decode asset: {0}")]
    Decode(String),

    #[error("No model locator given")]
    EmptyLocator,

    #[error("Load was cancelled")]
    Cancelled,
}

impl From<tokio::task::JoinError> for LoadError {
    fn from(e: tokio::task::JoinError) -> Self {
        if e.is_cancelled() {
            LoadError::Cancelled
        } else {
            LoadError::Decode(e.to_string())
        }
    }
}
