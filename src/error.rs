use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("Empty url")]
    EmptyUrl,

    #[error("Invalid fetch config: {0}")]
    InvalidConfig(&'static str),

    #[error("Invalid url")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Fetching {url} failed after {attempts} attempts (waited {waited:?})")]
    FetchExhausted {
        url: String,
        attempts: u32,
        waited: Duration,
        #[source]
        source: TransportError,
    },

    #[error("Http client error")]
    Http(#[from] reqwest::Error),

    #[error("Json error")]
    Json(#[from] serde_json::Error),
}

/// A single failed request attempt.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("http error: {0}")]
    Http(reqwest::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Http(err)
        }
    }
}
