use std::path::PathBuf;

use shared::error::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("api token contains characters not allowed in a header")]
    InvalidToken,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("failed to decode group list: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to read snapshot '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
