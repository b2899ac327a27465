use clap::{Parser, Subcommand};
use cricket_scraper::cricbuzz::{
    Highlights, LiveMatches, MatchCommentary, MiniScoreboard, PointsTable, Scorecard,
};
use cricket_scraper::{
    parse_extras, parse_fall_of_wickets, parse_score, scrape, FetchConfig, Fetcher,
    HttpTransport, Page, ScraperError, Transport, BASE_URL,
};
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;
use url::Url;

#[derive(Parser)]
#[command(name = "cricket-scraper")]
#[command(about = "Scrape live cricket scores, scorecards and points tables as JSON")]
struct Cli {
    /// Site root the page paths are joined to
    #[arg(long, default_value = BASE_URL)]
    base_url: Url,

    /// Total request attempts per page
    #[arg(long, default_value_t = 3)]
    attempts: u32,

    /// Initial backoff in seconds, doubled after every failure
    #[arg(long, default_value_t = 2.0)]
    delay: f64,

    /// Accept non-2xx responses instead of retrying them
    #[arg(long)]
    allow_error_status: bool,

    /// Single-line JSON output
    #[arg(long)]
    compact: bool,

    /// Repeat the command every SECS seconds
    #[arg(long, value_name = "SECS")]
    every: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List live matches
    Live,
    /// Compact live scoreboard of a match
    Mini { match_id: String },
    /// Full scorecard of a match
    Scorecard { match_id: String },
    /// Ball-by-ball commentary of a match
    Commentary { match_id: String },
    /// Key events of a match
    Highlights { match_id: String },
    /// Points table of a series
    Points { series_id: String },
    /// Parse an innings summary such as "186/4 (32.0 Ov)"
    Score { text: String },
    /// Parse an extras line such as "Extras 12 (b 1, lb 2, w 5, nb 4)"
    Extras { text: String },
    /// Parse a fall of wickets line
    Fow { text: String },
}

fn initial_delay(secs: f64) -> Result<Duration, ScraperError> {
    match Duration::try_from_secs_f64(secs) {
        Ok(delay) if !delay.is_zero() => Ok(delay),
        _ => Err(ScraperError::InvalidConfig(
            "delay must be a positive number of seconds",
        )),
    }
}

struct Runner<T> {
    fetcher: Fetcher<T>,
    base_url: Url,
    compact: bool,
}

impl<T: Transport> Runner<T> {
    fn print<V: Serialize>(&self, value: &V) -> Result<(), ScraperError> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        println!("{}", json);
        Ok(())
    }

    async fn scrape_and_print<P: Page>(&self, page: P) -> Result<(), ScraperError> {
        let output = scrape(&self.fetcher, &self.base_url, &page).await?;
        self.print(&output)
    }

    async fn run(&self, command: &Commands) -> Result<(), ScraperError> {
        match command {
            Commands::Live => {
                self.scrape_and_print(LiveMatches {
                    base_url: self.base_url.clone(),
                })
                .await
            }
            Commands::Mini { match_id } => {
                self.scrape_and_print(MiniScoreboard {
                    match_id: match_id.clone(),
                })
                .await
            }
            Commands::Scorecard { match_id } => {
                self.scrape_and_print(Scorecard {
                    match_id: match_id.clone(),
                })
                .await
            }
            Commands::Commentary { match_id } => {
                self.scrape_and_print(MatchCommentary {
                    match_id: match_id.clone(),
                })
                .await
            }
            Commands::Highlights { match_id } => {
                self.scrape_and_print(Highlights {
                    match_id: match_id.clone(),
                })
                .await
            }
            Commands::Points { series_id } => {
                self.scrape_and_print(PointsTable {
                    series_id: series_id.clone(),
                })
                .await
            }
            Commands::Score { text } => self.print(&parse_score(text)),
            Commands::Extras { text } => self.print(&parse_extras(text)),
            Commands::Fow { text } => self.print(&parse_fall_of_wickets(text)),
        }
    }

    /// Used by the refresh loop, where one failed round must not end the run.
    async fn run_logged(&self, command: &Commands) -> bool {
        match self.run(command).await {
            Ok(()) => true,
            Err(e) => {
                error!("Refresh failed: {}", e);
                false
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let cli = Cli::parse();

    let config = FetchConfig {
        max_attempts: cli.attempts,
        initial_delay: initial_delay(cli.delay)?,
        fail_on_status: !cli.allow_error_status,
    };
    let transport = HttpTransport::new(cli.base_url.as_str())?;
    let runner = Runner {
        fetcher: Fetcher::new(transport, config)?,
        base_url: cli.base_url.clone(),
        compact: cli.compact,
    };

    match cli.every {
        None => runner.run(&cli.command).await?,
        Some(secs) => {
            let interval = Duration::from_secs(secs.max(1));
            loop {
                runner.run_logged(&cli.command).await;
                info!("Next refresh in {:?}", interval);
                tokio::time::sleep(interval).await;
            }
        }
    }

    Ok(())
}
