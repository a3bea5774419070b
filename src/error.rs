use thiserror::Error;

/// Errors raised while talking to the certificate search service or probing hosts.
///
/// Only `InvalidDomain` is meant to stop a run; everything else is logged and
/// turned into "no results" (fetching) or a zero status (probing).
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("invalid domain format: {0}")]
    InvalidDomain(String),

    #[error("request to {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed response body: {0}")]
    Parse(String),

    #[error("probe of {url} failed: {reason}")]
    Probe { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ScraperError {
    fn from(e: serde_json::Error) -> Self {
        ScraperError::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScraperError>;
