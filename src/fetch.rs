use crate::error::{ScraperError, TransportError};
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::{debug, error, warn};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/96.0.4664.110 Safari/537.36";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct Response {
    pub status: u16,
    pub body: String,
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Response, TransportError>;
}

/// `reqwest` client carrying the fixed browser-like header set.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(referer: &str) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static(ACCEPT_LANGUAGE),
        );
        if let Ok(referer) = HeaderValue::from_str(referer) {
            headers.insert(header::REFERER, referer);
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(HttpTransport { client })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Response, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(Response { status, body })
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    /// Treat a non-2xx status as a failed attempt.
    pub fail_on_status: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            max_attempts: 3,
            initial_delay: Duration::from_secs(2),
            fail_on_status: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
    pub attempts: u32,
    pub waited: Duration,
}

impl FetchedPage {
    pub fn byte_len(&self) -> usize {
        self.body.len()
    }
}

pub struct Fetcher<T> {
    transport: T,
    config: FetchConfig,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, config: FetchConfig) -> Result<Self, ScraperError> {
        if config.max_attempts == 0 {
            return Err(ScraperError::InvalidConfig("max_attempts must be at least 1"));
        }
        if config.initial_delay.is_zero() {
            return Err(ScraperError::InvalidConfig("initial_delay must be positive"));
        }
        Ok(Fetcher { transport, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Delay slept after the `attempt`-th failure (1-based).
    fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.config
            .initial_delay
            .saturating_mul(2_u32.saturating_pow(exponent))
    }

    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, ScraperError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ScraperError::EmptyUrl);
        }

        let mut waited = Duration::ZERO;
        let mut attempt = 0;
        loop {
            attempt += 1;
            debug!("Visit {} (attempt {}/{})", url, attempt, self.config.max_attempts);

            let result = match self.transport.get(url).await {
                Ok(response)
                    if self.config.fail_on_status && !(200..300).contains(&response.status) =>
                {
                    Err(TransportError::Status(response.status))
                }
                other => other,
            };

            let err = match result {
                Ok(response) => {
                    return Ok(FetchedPage {
                        url: url.to_string(),
                        status: response.status,
                        body: response.body,
                        attempts: attempt,
                        waited,
                    })
                }
                Err(err) => err,
            };

            if attempt >= self.config.max_attempts {
                error!("Giving up on {} after {} attempts: {}", url, attempt, err);
                return Err(ScraperError::FetchExhausted {
                    url: url.to_string(),
                    attempts: attempt,
                    waited,
                    source: err,
                });
            }

            let delay = self.backoff(attempt);
            warn!("Fetching {} failed: {}. Retrying in {:?}", url, err, delay);
            tokio::time::sleep(delay).await;
            waited += delay;
        }
    }
}
