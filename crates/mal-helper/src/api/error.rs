use thiserror::Error;

/// Errors from the MyAnimeList API client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request for {url} failed with status {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("failed to parse response from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("expected a single record from {url}, got a listing")]
    UnexpectedShape { url: String },

    #[error("{kind} catalog does not support {operation}")]
    Unsupported {
        kind: &'static str,
        operation: &'static str,
    },

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
