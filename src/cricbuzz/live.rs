use crate::{
    cricbuzz::LiveMatch,
    utils::{clean_text, first_text},
    Page,
};
use itertools::Itertools;
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

const E: &str = "Invalid selector";
lazy_static! {
    static ref MATCH_CARD: Selector = Selector::parse("div.cb-mtch-lst").expect(E);
    static ref MATCH_LINK: Selector = Selector::parse("a.text-hvr-underline").expect(E);
    static ref HEADING: Selector = Selector::parse("h3").expect(E);
    static ref STATUS: Selector = Selector::parse("div.cb-font-12").expect(E);
    static ref SCORE: Selector = Selector::parse("div.cb-scr-wll-chrct").expect(E);
}

#[derive(Debug)]
pub struct LiveMatches {
    pub base_url: Url,
}

/// `/live-cricket-scores/91805/ind-vs-aus` -> `91805`
fn match_id_from_href(href: &str) -> Option<&str> {
    href.trim_end_matches('/')
        .rsplit('/')
        .nth(1)
        .filter(|id| !id.is_empty())
}

impl Page for LiveMatches {
    type Output = Vec<LiveMatch>;

    fn path(&self) -> String {
        "/cricket-match/live-scores".to_string()
    }

    fn extract(&self, doc: &Html) -> Self::Output {
        let matches = doc
            .select(&MATCH_CARD)
            .filter_map(|card| {
                let link = card.select(&MATCH_LINK).next()?;
                let href = link.value().attr("href")?.trim();
                let match_id = match_id_from_href(href)?.to_string();

                let teams = first_text(link, &HEADING)
                    .or_else(|| Some(clean_text(link)).filter(|s| !s.is_empty()))
                    .or_else(|| link.value().attr("title").map(ToString::to_string))
                    .unwrap_or_default();

                let url = self
                    .base_url
                    .join(href)
                    .map(String::from)
                    .unwrap_or_else(|_| href.to_string());

                Some(LiveMatch {
                    match_id,
                    teams,
                    score: first_text(card, &SCORE),
                    status: first_text(card, &STATUS),
                    url,
                })
            })
            .unique_by(|m| m.match_id.clone())
            .collect::<Vec<_>>();

        debug!("Found {} live matches", matches.len());
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BASE_URL;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_match_id_from_href() {
        assert_eq!(
            match_id_from_href("/live-cricket-scores/91805/ind-vs-aus-1st-odi"),
            Some("91805")
        );
        assert_eq!(
            match_id_from_href("/live-cricket-scores/91805/ind-vs-aus-1st-odi/"),
            Some("91805")
        );
        assert_eq!(match_id_from_href("scores"), None);
    }

    #[test]
    fn test_parsing_live_matches() {
        let page = LiveMatches {
            base_url: Url::parse(BASE_URL).unwrap(),
        };
        let html = fs::read_to_string("tests/htmls/live.html").expect("Invalid file path");
        let html = Html::parse_document(&html);

        let matches = page.extract(&html);
        assert_eq!(
            matches,
            vec![
                LiveMatch {
                    match_id: "91805".to_string(),
                    teams: "India vs Australia, 1st ODI".to_string(),
                    score: Some("IND 186/4 (32.0 Ov)".to_string()),
                    status: Some("India opt to bat".to_string()),
                    url: "https://www.cricbuzz.com/live-cricket-scores/91805/ind-vs-aus-1st-odi"
                        .to_string(),
                },
                LiveMatch {
                    match_id: "91812".to_string(),
                    teams: "England vs New Zealand, 2nd Test".to_string(),
                    score: None,
                    status: None,
                    url: "https://www.cricbuzz.com/live-cricket-scores/91812/eng-vs-nz-2nd-test"
                        .to_string(),
                },
            ]
        );
    }
}
