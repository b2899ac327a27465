//! Decomposition of scoreboard text into numeric fields.
//!
//! Every function here is total: malformed tokens leave their field absent
//! (or zero for extras) instead of failing the whole parse.

use serde::{Deserialize, Serialize};
use std::fmt;

const ALL_OUT_WICKETS: i32 = 10;
const OVERS_SUFFIX: &str = "Ov";
const EXTRAS_KEYWORD: &str = "Extras";
const FALL_OF_WICKETS_LABEL: &str = "Fall of Wickets";

/// Innings summary such as `186/4 (32.0 Ov)`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedScore {
    pub runs: Option<i32>,
    pub wickets: Option<i32>,
    /// Kept as text so `32.0` stays `32.0`.
    pub overs: Option<String>,
    pub is_all_out: bool,
}

impl fmt::Display for ParsedScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.runs, self.wickets) {
            (Some(runs), Some(wickets)) => write!(f, "{}/{}", runs, wickets)?,
            (Some(runs), None) => write!(f, "{}", runs)?,
            (None, Some(wickets)) => write!(f, "-/{}", wickets)?,
            (None, None) => {}
        }
        if let Some(overs) = self.overs.as_ref() {
            if self.runs.is_some() || self.wickets.is_some() {
                write!(f, " ")?;
            }
            write!(f, "({} Ov)", overs)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrasBreakdown {
    pub total: u32,
    pub byes: u32,
    pub leg_byes: u32,
    pub wides: u32,
    pub no_balls: u32,
    pub penalty: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallOfWicket {
    pub wicket: u32,
    pub runs: u32,
    pub batter: String,
    pub over: Option<String>,
}

fn parse_int(token: &str) -> Option<i32> {
    token.trim().parse().ok()
}

/// Text between `(` and the first `Ov`, e.g. `32.0 Ov)` -> `32.0`.
fn overs_token(tail: &str) -> Option<String> {
    let (overs, _) = tail.split_once(OVERS_SUFFIX)?;
    let overs = overs.trim();
    if overs.is_empty() {
        None
    } else {
        Some(overs.to_string())
    }
}

pub fn parse_score(text: &str) -> ParsedScore {
    let text = text.trim();
    if text.is_empty() {
        return ParsedScore::default();
    }

    let Some((runs, rest)) = text.split_once('/') else {
        return ParsedScore {
            overs: text.split_once('(').and_then(|(_, tail)| overs_token(tail)),
            ..ParsedScore::default()
        };
    };

    let (wickets, overs) = match rest.split_once('(') {
        Some((wickets, tail)) => (wickets, overs_token(tail)),
        None => (rest, None),
    };
    let wickets = parse_int(wickets);

    ParsedScore {
        runs: parse_int(runs),
        wickets,
        overs,
        is_all_out: wickets == Some(ALL_OUT_WICKETS),
    }
}

pub fn parse_extras(text: &str) -> ExtrasBreakdown {
    let Some((_, rest)) = text.split_once(EXTRAS_KEYWORD) else {
        return ExtrasBreakdown::default();
    };
    let rest = rest.trim();

    let (total, components) = match rest.split_once('(') {
        Some((total, tail)) => {
            let inner = tail.split_once(')').map_or(tail, |(inner, _)| inner);
            (total, Some(inner))
        }
        None => (rest, None),
    };

    // A breakdown without its total means nothing.
    let Ok(total) = total.trim().parse::<u32>() else {
        return ExtrasBreakdown::default();
    };

    let mut extras = ExtrasBreakdown {
        total,
        ..ExtrasBreakdown::default()
    };
    for item in components.into_iter().flat_map(|c| c.split(',')) {
        let tokens: Vec<&str> = item.trim().split(' ').collect();
        // Notation is code first: `b 1`, `lb 2`.
        let [code, value] = tokens.as_slice() else {
            continue;
        };
        let Ok(value) = value.parse::<u32>() else {
            continue;
        };
        match *code {
            "b" => extras.byes = value,
            "lb" => extras.leg_byes = value,
            "w" => extras.wides = value,
            "nb" => extras.no_balls = value,
            "p" => extras.penalty = value,
            _ => {}
        }
    }
    extras
}

/// Reads `23-1 (Rohit Sharma, 4.2 ov), 45-2 (Shubman Gill, 8.1)`, team
/// total first, with or without a leading `Fall of Wickets:` label.
pub fn parse_fall_of_wickets(text: &str) -> Vec<FallOfWicket> {
    let text = text.trim();
    let mut rest = text
        .strip_prefix(FALL_OF_WICKETS_LABEL)
        .map_or(text, |s| s.trim_start().trim_start_matches(':'));

    let mut wickets = vec![];
    while let Some((head, tail)) = rest.split_once('(') {
        let (inside, after) = tail.split_once(')').unwrap_or((tail, ""));
        rest = after;

        let head = head.trim().trim_start_matches(',').trim();
        let Some((runs, wicket)) = head.split_once('-') else {
            continue;
        };
        let (Ok(wicket), Ok(runs)) = (wicket.trim().parse::<u32>(), runs.trim().parse::<u32>())
        else {
            continue;
        };

        let (batter, over) = match inside.rsplit_once(',') {
            Some((batter, over)) => {
                let over = over.trim();
                let over = over
                    .strip_suffix("ov")
                    .or_else(|| over.strip_suffix("Ov"))
                    .unwrap_or(over)
                    .trim();
                (batter, (!over.is_empty()).then(|| over.to_string()))
            }
            None => (inside, None),
        };

        wickets.push(FallOfWicket {
            wicket,
            runs,
            batter: batter.trim().to_string(),
            over,
        });
    }
    wickets
}
