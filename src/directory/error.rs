use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DirectoryError {
    /// Whether a retry can reasonably succeed. Throttling and server-side
    /// failures are transient; 4xx responses and parse failures are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(error) => error.is_timeout() || error.is_connect(),
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::Serialization(_) => false,
        }
    }
}
