use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Failure taxonomy for a crawl.
///
/// `Transport` and `HttpStatus` are transient: the detail-page fetch retries
/// them and eventually degrades to a skipped product. Everything else is
/// structural or plumbing and propagates to the caller.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("invalid header `{name}`: {detail}")]
    InvalidHeader { name: String, detail: String },

    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{url} returned HTTP status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("no structured-data block on {0}")]
    MissingJsonLd(String),

    #[error("structured-data block on {url} is malformed: {detail}")]
    MalformedJsonLd { url: String, detail: String },

    #[error("structured-data on {url} is missing `{field}`")]
    MissingField { url: String, field: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    /// True for the two failure classes the detail-page retry loop absorbs.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ScrapeError::Transport { .. } | ScrapeError::HttpStatus { .. }
        )
    }
}
