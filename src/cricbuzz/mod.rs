mod commentary;
mod live;
mod mini;
mod points;
mod scorecard;

pub use commentary::{Highlights, MatchCommentary};
pub use live::LiveMatches;
pub use mini::MiniScoreboard;
pub use points::PointsTable;
pub use scorecard::Scorecard;

use crate::score::{ExtrasBreakdown, FallOfWicket, ParsedScore};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMatch {
    pub match_id: String,
    pub teams: String,
    pub score: Option<String>,
    pub status: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScorecard {
    pub match_id: String,
    pub title: Option<String>,
    pub status: Option<String>,
    pub venue: Option<String>,
    pub series: Option<String>,
    pub teams: Vec<TeamScore>,
    pub innings: Vec<Innings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamScore {
    pub name: String,
    pub score: Option<String>,
    pub parsed: ParsedScore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Innings {
    pub team: String,
    pub score: Option<String>,
    pub parsed: ParsedScore,
    pub batters: Vec<BatterLine>,
    pub bowlers: Vec<BowlerLine>,
    pub extras: ExtrasBreakdown,
    pub fall_of_wickets: Vec<FallOfWicket>,
}

/// Cell text exactly as shown on the scorecard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatterLine {
    pub name: String,
    pub dismissal: String,
    pub runs: String,
    pub balls: String,
    pub fours: String,
    pub sixes: String,
    pub strike_rate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlerLine {
    pub name: String,
    pub overs: String,
    pub maidens: String,
    pub runs: String,
    pub wickets: String,
    pub no_balls: String,
    pub wides: String,
    pub economy: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniScore {
    pub match_id: String,
    pub teams: Option<String>,
    pub score: Option<String>,
    pub parsed: ParsedScore,
    pub status: Option<String>,
    pub partnership: Option<String>,
    pub last_wicket: Option<String>,
    pub current_batters: Vec<String>,
    pub current_bowlers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Commentary {
    pub match_id: String,
    pub scraped_at: DateTime<Utc>,
    /// Most recent ball first, as the page lists them.
    pub lines: Vec<CommentaryLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentaryLine {
    pub text: String,
    pub over: Option<String>,
    pub is_wicket: bool,
    pub is_boundary: bool,
    pub is_four: bool,
    pub is_six: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightKind {
    Boundary,
    Wicket,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub text: String,
    pub timestamp: Option<String>,
    pub kind: HighlightKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsRow {
    pub position: String,
    pub team: String,
    pub matches: Option<u32>,
    pub won: Option<u32>,
    pub lost: Option<u32>,
    pub tied: Option<u32>,
    pub no_result: Option<u32>,
    pub points: Option<u32>,
    pub net_run_rate: Option<f64>,
}
