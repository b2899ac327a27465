use crate::{
    cricbuzz::{BatterLine, BowlerLine, Innings, MatchScorecard, TeamScore},
    score::{parse_extras, parse_fall_of_wickets, parse_score},
    utils::{cell, child_cells, clean_text, first_text, has_class},
    Page,
};
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

const E: &str = "Invalid selector";
lazy_static! {
    static ref TITLE: Selector = Selector::parse(".cb-nav-hdr .cb-nav-hdr-lg").expect(E);
    static ref STATUS: Selector =
        Selector::parse(".cb-text-complete, .cb-text-inprogress").expect(E);
    static ref VENUE: Selector = Selector::parse(".cb-nav-subhdr .cb-font-12").expect(E);
    static ref TEAM: Selector = Selector::parse(".cb-mscr-tm").expect(E);
    static ref TEAM_NAME: Selector = Selector::parse(".cb-mscr-tm-nm").expect(E);
    static ref TEAM_SCORE: Selector = Selector::parse(".cb-mscr-tm-scr").expect(E);
    static ref INNINGS: Selector = Selector::parse(".cb-ltst-wgt-hdr").expect(E);
    static ref INNINGS_HEADER: Selector = Selector::parse(".cb-scrd-hdr-rw").expect(E);
    static ref INNINGS_SCORE: Selector = Selector::parse(".cb-scrd-hdr-rw .pull-right").expect(E);
    static ref SECTION_ROWS: Selector =
        Selector::parse(".cb-scrd-sub-hdr, .cb-scrd-itms").expect(E);
}

const SUB_HEADER_CLASS: &str = "cb-scrd-sub-hdr";
const INNINGS_KEYWORD: &str = "Innings";
const BATTER_CELLS: usize = 7;
const BOWLER_CELLS: usize = 8;

#[derive(Debug)]
pub struct Scorecard {
    pub match_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Batting,
    Bowling,
    FallOfWickets,
    Other,
}

impl Section {
    fn from_header(text: &str) -> Self {
        if text.contains("Fall of Wickets") {
            Section::FallOfWickets
        } else if text.contains("Bowler") {
            Section::Bowling
        } else if text.contains("Batter") || text.contains("Batsm") {
            Section::Batting
        } else {
            Section::Other
        }
    }
}

impl BatterLine {
    fn from_cells(cells: &[String]) -> Self {
        BatterLine {
            name: cell(cells, 0),
            dismissal: cell(cells, 1),
            runs: cell(cells, 2),
            balls: cell(cells, 3),
            fours: cell(cells, 4),
            sixes: cell(cells, 5),
            strike_rate: cell(cells, 6),
        }
    }
}

impl BowlerLine {
    fn from_cells(cells: &[String]) -> Self {
        BowlerLine {
            name: cell(cells, 0),
            overs: cell(cells, 1),
            maidens: cell(cells, 2),
            runs: cell(cells, 3),
            wickets: cell(cells, 4),
            no_balls: cell(cells, 5),
            wides: cell(cells, 6),
            economy: cell(cells, 7),
        }
    }
}

fn start_innings(block: ElementRef) -> Option<Innings> {
    let header = first_text(block, &INNINGS_HEADER)?;
    if !header.contains(INNINGS_KEYWORD) {
        return None;
    }
    let team = header
        .split(INNINGS_KEYWORD)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();
    let score = first_text(block, &INNINGS_SCORE);

    Some(Innings {
        team,
        parsed: parse_score(score.as_deref().unwrap_or_default()),
        score,
        batters: vec![],
        bowlers: vec![],
        extras: Default::default(),
        fall_of_wickets: vec![],
    })
}

fn read_sections(block: ElementRef, innings: &mut Innings, mut section: Section) {
    for row in block.select(&SECTION_ROWS) {
        if has_class(row, SUB_HEADER_CLASS) {
            section = Section::from_header(&clean_text(row));
            continue;
        }

        let cells = child_cells(row);
        match section {
            Section::Batting => match cells.first().map(String::as_str) {
                Some("Extras") => innings.extras = parse_extras(&cells.join(" ")),
                Some("Total") | Some("Did not Bat") | Some("Yet to Bat") => {}
                _ if cells.len() >= BATTER_CELLS => {
                    innings.batters.push(BatterLine::from_cells(&cells))
                }
                _ => {}
            },
            Section::Bowling if cells.len() >= BOWLER_CELLS => {
                innings.bowlers.push(BowlerLine::from_cells(&cells))
            }
            Section::FallOfWickets => innings
                .fall_of_wickets
                .extend(parse_fall_of_wickets(&clean_text(row))),
            _ => {}
        }
    }
}

/// Walks the `.cb-ltst-wgt-hdr` blocks in page order. A block headed
/// "<Team> Innings" opens an innings. The site often puts the bowling
/// figures in the next block, which has no header row at all, so such a
/// block continues the innings before it. Any other header ("Match Info")
/// closes the innings.
fn extract_innings(doc: &Html) -> Vec<Innings> {
    let mut innings: Vec<Innings> = vec![];
    let mut open = false;
    for block in doc.select(&INNINGS) {
        if block.select(&INNINGS_HEADER).next().is_none() {
            if let Some(current) = innings.last_mut().filter(|_| open) {
                read_sections(block, current, Section::Other);
            }
            continue;
        }

        match start_innings(block) {
            Some(mut current) => {
                read_sections(block, &mut current, Section::Batting);
                innings.push(current);
                open = true;
            }
            None => open = false,
        }
    }
    innings
}

impl Page for Scorecard {
    type Output = MatchScorecard;

    fn path(&self) -> String {
        format!("/live-cricket-scorecard/{}", self.match_id)
    }

    fn extract(&self, doc: &Html) -> Self::Output {
        let root = doc.root_element();

        let title_el = doc.select(&TITLE).next();
        let title = title_el.map(clean_text).filter(|s| !s.is_empty());
        let series = title_el
            .and_then(|el| el.value().attr("title"))
            .map(|s| s.trim().to_string());

        let teams = doc
            .select(&TEAM)
            .map(|el| {
                let score = first_text(el, &TEAM_SCORE);
                TeamScore {
                    name: first_text(el, &TEAM_NAME).unwrap_or_default(),
                    parsed: parse_score(score.as_deref().unwrap_or_default()),
                    score,
                }
            })
            .collect::<Vec<_>>();

        let innings = extract_innings(doc);
        debug!(
            "Match {}: {} teams, {} innings",
            self.match_id,
            teams.len(),
            innings.len()
        );

        MatchScorecard {
            match_id: self.match_id.clone(),
            title,
            status: first_text(root, &STATUS),
            venue: first_text(root, &VENUE),
            series,
            teams,
            innings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{ExtrasBreakdown, FallOfWicket, ParsedScore};
    use pretty_assertions::assert_eq;
    use std::fs;

    fn strings<const N: usize>(cells: [&str; N]) -> Vec<String> {
        cells.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_section_from_header() {
        assert_eq!(Section::from_header("Batter R B 4s 6s SR"), Section::Batting);
        assert_eq!(Section::from_header("Batsman R B"), Section::Batting);
        assert_eq!(Section::from_header("Bowler O M R W"), Section::Bowling);
        assert_eq!(
            Section::from_header("Fall of Wickets"),
            Section::FallOfWickets
        );
        assert_eq!(Section::from_header("Powerplays"), Section::Other);
    }

    #[test]
    fn test_parsing_scorecard() {
        let page = Scorecard {
            match_id: "91805".to_string(),
        };
        let html = fs::read_to_string("tests/htmls/scorecard.html").expect("Invalid file path");
        let html = Html::parse_document(&html);

        let card = page.extract(&html);

        assert_eq!(card.match_id, "91805");
        assert_eq!(card.title.as_deref(), Some("India vs Australia, 1st ODI"));
        assert_eq!(
            card.series.as_deref(),
            Some("India vs Australia, 1st ODI - Live Cricket Score")
        );
        assert_eq!(card.status.as_deref(), Some("India opt to bat"));
        assert_eq!(
            card.venue.as_deref(),
            Some("Venue: Wankhede Stadium, Mumbai")
        );

        assert_eq!(
            card.teams,
            vec![
                TeamScore {
                    name: "IND".to_string(),
                    score: Some("186/4 (32.0 Ov)".to_string()),
                    parsed: parse_score("186/4 (32.0 Ov)"),
                },
                TeamScore {
                    name: "AUS".to_string(),
                    score: None,
                    parsed: ParsedScore::default(),
                },
            ]
        );

        assert_eq!(card.innings.len(), 1);
        let innings = &card.innings[0];
        assert_eq!(innings.team, "India");
        assert_eq!(innings.score.as_deref(), Some("186/4 (32.0 Ov)"));
        assert_eq!(innings.parsed.runs, Some(186));
        assert_eq!(innings.parsed.wickets, Some(4));
        assert_eq!(innings.parsed.overs.as_deref(), Some("32.0"));

        assert_eq!(
            innings.batters,
            vec![
                BatterLine::from_cells(&strings([
                    "Rohit Sharma (c)",
                    "c Carey b Starc",
                    "12",
                    "15",
                    "2",
                    "0",
                    "80.00",
                ])),
                BatterLine::from_cells(&strings([
                    "Virat Kohli",
                    "not out",
                    "88",
                    "90",
                    "8",
                    "2",
                    "97.78",
                ])),
            ]
        );

        assert_eq!(
            innings.extras,
            ExtrasBreakdown {
                total: 12,
                byes: 1,
                leg_byes: 2,
                wides: 5,
                no_balls: 4,
                penalty: 0,
            }
        );

        assert_eq!(
            innings.fall_of_wickets,
            vec![
                FallOfWicket {
                    wicket: 1,
                    runs: 23,
                    batter: "Rohit Sharma".to_string(),
                    over: Some("4.2".to_string()),
                },
                FallOfWicket {
                    wicket: 2,
                    runs: 45,
                    batter: "Shubman Gill".to_string(),
                    over: Some("8.1".to_string()),
                },
            ]
        );

        assert_eq!(
            innings.bowlers,
            vec![BowlerLine::from_cells(&strings([
                "Mitchell Starc",
                "7",
                "0",
                "45",
                "1",
                "2",
                "3",
                "6.40",
            ]))]
        );
    }

    #[test]
    fn test_parsing_scorecard_split_blocks() {
        let page = Scorecard {
            match_id: "91806".to_string(),
        };
        let html =
            fs::read_to_string("tests/htmls/scorecard_split.html").expect("Invalid file path");
        let html = Html::parse_document(&html);

        let card = page.extract(&html);
        assert_eq!(card.innings.len(), 2);

        let first = &card.innings[0];
        assert_eq!(first.team, "Australia");
        assert_eq!(first.batters.len(), 1);
        assert_eq!(first.extras.total, 6);
        assert_eq!(first.extras.wides, 4);
        assert_eq!(
            first.fall_of_wickets,
            vec![FallOfWicket {
                wicket: 1,
                runs: 31,
                batter: "Travis Head".to_string(),
                over: Some("5.3".to_string()),
            }]
        );
        assert_eq!(
            first.bowlers,
            vec![
                BowlerLine::from_cells(&strings([
                    "Jasprit Bumrah",
                    "10",
                    "1",
                    "38",
                    "2",
                    "0",
                    "1",
                    "3.80",
                ])),
                BowlerLine::from_cells(&strings([
                    "Kuldeep Yadav",
                    "10",
                    "0",
                    "52",
                    "1",
                    "0",
                    "0",
                    "5.20",
                ])),
            ]
        );

        // The second innings has no bowling block yet. The toss table after
        // "Match Info" must not leak into it.
        let second = &card.innings[1];
        assert_eq!(second.team, "India");
        assert_eq!(second.parsed.runs, Some(12));
        assert!(second.bowlers.is_empty());
        assert!(second.batters.is_empty());
    }

    #[test]
    fn test_empty_scorecard() {
        let page = Scorecard {
            match_id: "1".to_string(),
        };
        let card = page.extract(&Html::parse_document("<html><body></body></html>"));
        assert_eq!(card.title, None);
        assert_eq!(card.status, None);
        assert!(card.teams.is_empty());
        assert!(card.innings.is_empty());
    }
}
