use lazy_regex::regex;
use scraper::{ElementRef, Selector};

/// Element text with runs of whitespace collapsed to one space.
pub(crate) fn clean_text(el: ElementRef) -> String {
    let text = el.text().collect::<String>();
    regex!(r"\s+").replace_all(&text, " ").trim().to_string()
}

pub(crate) fn first_text(scope: ElementRef, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(clean_text)
        .filter(|s| !s.is_empty())
}

/// Cleaned text of each direct child element.
pub(crate) fn child_cells(el: ElementRef) -> Vec<String> {
    el.children()
        .filter_map(ElementRef::wrap)
        .map(clean_text)
        .collect()
}

pub(crate) fn has_class(el: ElementRef, class: &str) -> bool {
    el.value()
        .attr("class")
        .map_or(false, |classes| classes.split_whitespace().any(|c| c == class))
}

pub(crate) fn cell(cells: &[String], index: usize) -> String {
    cells.get(index).cloned().unwrap_or_default()
}
