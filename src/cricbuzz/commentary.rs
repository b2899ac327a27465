use crate::{
    cricbuzz::{Commentary, CommentaryLine, Highlight, HighlightKind},
    utils::{clean_text, first_text, has_class},
    Page,
};
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use tracing::debug;

const E: &str = "Invalid selector";
lazy_static! {
    static ref COMMENTARY_ITEMS: Selector = Selector::parse(".cb-com-over, .cb-com-ln").expect(E);
    static ref KEY_EVENT: Selector = Selector::parse(".cb-mat-key-evt").expect(E);
    static ref KEY_EVENT_TIME: Selector = Selector::parse(".cb-mat-key-evt-time").expect(E);
}

const OVER_CLASS: &str = "cb-com-over";

#[derive(Debug)]
pub struct MatchCommentary {
    pub match_id: String,
}

impl CommentaryLine {
    fn new(text: String, over: Option<String>) -> Self {
        let is_four = text.contains("FOUR");
        // A ball is one boundary or the other.
        let is_six = !is_four && text.contains("SIX");
        CommentaryLine {
            is_wicket: text.contains("OUT") || text.contains("WICKET"),
            is_boundary: is_four || is_six,
            is_four,
            is_six,
            over,
            text,
        }
    }
}

impl Page for MatchCommentary {
    type Output = Commentary;

    fn path(&self) -> String {
        format!("/live-cricket-scores/{}", self.match_id)
    }

    fn extract(&self, doc: &Html) -> Self::Output {
        let mut lines = vec![];
        // An over marker labels the commentary line right after it.
        let mut over = None;
        for el in doc.select(&COMMENTARY_ITEMS) {
            let text = clean_text(el);
            if has_class(el, OVER_CLASS) {
                over = Some(text).filter(|s| !s.is_empty());
            } else if !text.is_empty() {
                lines.push(CommentaryLine::new(text, over.take()));
            } else {
                over = None;
            }
        }
        debug!("Match {}: {} commentary lines", self.match_id, lines.len());

        Commentary {
            match_id: self.match_id.clone(),
            scraped_at: chrono::Utc::now(),
            lines,
        }
    }
}

#[derive(Debug)]
pub struct Highlights {
    pub match_id: String,
}

impl HighlightKind {
    fn of(text: &str) -> Self {
        if text.contains("FOUR") || text.contains("SIX") {
            HighlightKind::Boundary
        } else if text.contains("WICKET") {
            HighlightKind::Wicket
        } else {
            HighlightKind::Other
        }
    }
}

impl Page for Highlights {
    type Output = Vec<Highlight>;

    fn path(&self) -> String {
        format!("/cricket-match/live-scores/{}", self.match_id)
    }

    fn extract(&self, doc: &Html) -> Self::Output {
        doc.select(&KEY_EVENT)
            .map(|el| {
                let text = clean_text(el);
                let timestamp = first_text(el, &KEY_EVENT_TIME);
                let text = match timestamp.as_deref() {
                    Some(ts) => text.replacen(ts, "", 1).trim().to_string(),
                    None => text,
                };
                Highlight {
                    kind: HighlightKind::of(&text),
                    text,
                    timestamp,
                }
            })
            .collect()
    }
}
