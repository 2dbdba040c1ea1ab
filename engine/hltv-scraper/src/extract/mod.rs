//! Record extraction from rendered HLTV pages
//!
//! Every extractor is a pure function over a parsed document. Landmarks are
//! the site's CSS classes; a missing landmark leaves the affected field
//! `None` instead of failing the row.

pub mod matches;
pub mod odds;
pub mod players;
pub mod ranking;
pub mod results;

pub use matches::extract_match_time;
pub use odds::extract_odds;
pub use players::extract_top_players;
pub use ranking::{extract_ranking, extract_top_teams};
pub use results::{extract_results, has_results};

use anyhow::Result;
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

/// Prefix for most absolute links written to records
pub const SITE_ROOT: &str = "https://hltv.org";

/// Prefix used for stats and player links
pub const SITE_ROOT_WWW: &str = "https://www.hltv.org";

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("digit pattern is valid"));

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("Failed to create selector '{}': {}", css, e))
}

/// All text below an element, untrimmed
pub(crate) fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>()
}

/// Trimmed text of the `n`th match of `sel` below `element`
pub(crate) fn nth_text(element: ElementRef, sel: &Selector, n: usize) -> Option<String> {
    element.select(sel).nth(n).map(|e| text_of(e).trim().to_string())
}

pub(crate) fn first_text(element: ElementRef, sel: &Selector) -> Option<String> {
    nth_text(element, sel, 0)
}

/// Attribute of the first match of `sel` below `element`
pub(crate) fn first_attr(element: ElementRef, sel: &Selector, attr: &str) -> Option<String> {
    element.select(sel).next().and_then(|e| e.value().attr(attr)).map(str::to_string)
}

/// `"/matches/2370001/a-vs-b"` with `from_end = 2` gives `"2370001"`
pub(crate) fn path_segment(href: &str, from_end: usize) -> Option<&str> {
    let segments: Vec<&str> = href.split('/').collect();
    segments.len().checked_sub(from_end).and_then(|i| segments.get(i)).copied()
}

/// Numeric ID carried in the second-to-last path segment of a link
pub(crate) fn id_from_href(href: &str) -> Option<u32> {
    path_segment(href, 2).and_then(parse_int)
}

/// First run of digits in `text` (`"#3"` → 3, `"(912 points)"` → 912)
pub fn parse_int(text: &str) -> Option<u32> {
    DIGITS.find(text).and_then(|m| m.as_str().parse().ok())
}

/// Absent when the text is empty
pub(crate) fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}
