use scraper::Html;
use serde::Serialize;
use tracing::info;
use url::Url;

pub mod cricbuzz;
pub mod fetch;
pub mod score;

mod error;
mod utils;

pub use error::{ScraperError, TransportError};
pub use fetch::{FetchConfig, FetchedPage, Fetcher, HttpTransport, Transport};
pub use score::{
    parse_extras, parse_fall_of_wickets, parse_score, ExtrasBreakdown, FallOfWicket, ParsedScore,
};

pub const BASE_URL: &str = "https://www.cricbuzz.com";

/// A page of the site and how to read it once parsed.
pub trait Page {
    type Output: Serialize;

    /// Path relative to the site root.
    fn path(&self) -> String;
    fn extract(&self, doc: &Html) -> Self::Output;
}

pub async fn scrape<P, T>(
    fetcher: &Fetcher<T>,
    base_url: &Url,
    page: &P,
) -> Result<P::Output, ScraperError>
where
    P: Page,
    T: Transport,
{
    let url = base_url.join(&page.path())?;
    let fetched = fetcher.fetch(url.as_str()).await?;
    info!(
        "Fetched {} ({} bytes, status {}, {} attempts)",
        fetched.url,
        fetched.byte_len(),
        fetched.status,
        fetched.attempts
    );

    let doc = Html::parse_document(&fetched.body);
    Ok(page.extract(&doc))
}
