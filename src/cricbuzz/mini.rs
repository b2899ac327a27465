use crate::{
    cricbuzz::MiniScore,
    score::parse_score,
    utils::{clean_text, first_text},
    Page,
};
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use tracing::debug;

const E: &str = "Invalid selector";
lazy_static! {
    static ref TEAMS: Selector =
        Selector::parse(r#"div[class="cb-col cb-col-100 cb-min-stts"] h1"#).expect(E);
    static ref SCORE: Selector = Selector::parse("div.cb-min-bat-rw").expect(E);
    static ref IN_PROGRESS: Selector = Selector::parse("div.cb-text-inprogress").expect(E);
    static ref COMPLETE: Selector = Selector::parse("div.cb-text-complete").expect(E);
    static ref PARTNERSHIP: Selector = Selector::parse("span.cb-min-itm-rw").expect(E);
    static ref LAST_WICKET: Selector = Selector::parse("span.cb-ovr-num").expect(E);
    static ref PLAYER: Selector = Selector::parse(r#"div[class="cb-col cb-col-50"]"#).expect(E);
}

/// The compact live scoreboard at the top of a match page.
#[derive(Debug)]
pub struct MiniScoreboard {
    pub match_id: String,
}

impl Page for MiniScoreboard {
    type Output = MiniScore;

    fn path(&self) -> String {
        format!("/live-cricket-scores/{}", self.match_id)
    }

    fn extract(&self, doc: &Html) -> Self::Output {
        let root = doc.root_element();
        let score = first_text(root, &SCORE);

        // Player cells alternate batter, bowler.
        let (batters, bowlers): (Vec<_>, Vec<_>) = doc
            .select(&PLAYER)
            .map(clean_text)
            .enumerate()
            .partition(|(i, _)| i % 2 == 0);
        let current_batters = batters.into_iter().map(|(_, name)| name).collect::<Vec<_>>();
        let current_bowlers = bowlers.into_iter().map(|(_, name)| name).collect::<Vec<_>>();
        debug!(
            "Match {}: {} batters, {} bowlers at the crease",
            self.match_id,
            current_batters.len(),
            current_bowlers.len()
        );

        MiniScore {
            match_id: self.match_id.clone(),
            teams: first_text(root, &TEAMS),
            parsed: parse_score(score.as_deref().unwrap_or_default()),
            score,
            status: first_text(root, &IN_PROGRESS).or_else(|| first_text(root, &COMPLETE)),
            partnership: first_text(root, &PARTNERSHIP),
            last_wicket: first_text(root, &LAST_WICKET),
            current_batters,
            current_bowlers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_parsing_mini_scoreboard() {
        let page = MiniScoreboard {
            match_id: "91805".to_string(),
        };
        let html = fs::read_to_string("tests/htmls/mini.html").expect("Invalid file path");
        let html = Html::parse_document(&html);

        let mini = page.extract(&html);
        assert_eq!(
            mini,
            MiniScore {
                match_id: "91805".to_string(),
                teams: Some("India vs Australia, 1st ODI - Live Cricket Score".to_string()),
                score: Some("IND 186/4 (32.0 Ov)".to_string()),
                parsed: parse_score("IND 186/4 (32.0 Ov)"),
                status: Some("India opt to bat".to_string()),
                partnership: Some("Partnership: 41(38)".to_string()),
                last_wicket: Some("Last Wkt: KL Rahul 19(27) - 145/4 in 27.5 ov.".to_string()),
                current_batters: vec![
                    "Virat Kohli 88(90)".to_string(),
                    "Hardik Pandya 14(11)".to_string(),
                ],
                current_bowlers: vec![
                    "Mitchell Starc 7-0-45-1".to_string(),
                    "Adam Zampa 6-0-31-2".to_string(),
                ],
            }
        );
        // A team prefix makes the runs token unreadable; the rest survives.
        assert_eq!(mini.parsed.runs, None);
        assert_eq!(mini.parsed.wickets, Some(4));
        assert_eq!(mini.parsed.overs.as_deref(), Some("32.0"));
    }

    #[test]
    fn test_mini_scoreboard_prefers_in_progress_status() {
        let page = MiniScoreboard {
            match_id: "1".to_string(),
        };
        let html = Html::parse_document(
            r#"<div class="cb-text-complete">Australia won by 5 wkts</div>
               <div class="cb-text-inprogress">Day 2: Stumps</div>
               <div class="cb-col cb-col-50 cb-min-hdr">Batter</div>"#,
        );

        let mini = page.extract(&html);
        assert_eq!(mini.status.as_deref(), Some("Day 2: Stumps"));
        assert_eq!(mini.teams, None);
        assert_eq!(mini.score, None);
        assert!(mini.current_batters.is_empty());
        assert!(mini.current_bowlers.is_empty());
    }
}
