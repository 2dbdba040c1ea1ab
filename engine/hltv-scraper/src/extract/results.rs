use super::{first_attr, first_text, id_from_href, nth_text, parse_int, selector, text_of, SITE_ROOT};
use crate::dates::DateNormalizer;
use crate::types::MatchResult;
use anyhow::Result;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

struct ResultSelectors {
    row: Selector,
    link: Selector,
    headline: Selector,
    placeholder_event: Selector,
    event: Selector,
    team_cell: Selector,
    score: Selector,
    span: Selector,
}

impl ResultSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            row: selector("div.result-con")?,
            link: selector("a.a-reset")?,
            headline: selector("span.standard-headline")?,
            placeholder_event: selector("td.placeholder-text-cell")?,
            event: selector("td.event")?,
            team_cell: selector("td.team-cell")?,
            score: selector("td.result-score")?,
            span: selector("span")?,
        })
    }
}

/// Whether the page still lists results; a page without any
/// `results-holder` marks the end of the listing
pub fn has_results(document: &Html) -> Result<bool> {
    let holder = selector("div.results-holder")?;
    Ok(document.select(&holder).next().is_some())
}

/// Every result row on a results page, in page order
///
/// Team IDs are left empty; they come from the team directory.
pub fn extract_results(document: &Html, dates: &DateNormalizer) -> Result<Vec<MatchResult>> {
    let holder = selector("div.results-holder")?;
    let sel = ResultSelectors::new()?;

    let mut results = Vec::new();
    let holders: Vec<ElementRef> = document.select(&holder).collect();
    debug!("Found {} result sections to process", holders.len());

    for section in holders {
        for row in section.select(&sel.row) {
            results.push(parse_result_row(row, &sel, dates));
        }
    }

    Ok(results)
}

fn parse_result_row(row: ElementRef, sel: &ResultSelectors, dates: &DateNormalizer) -> MatchResult {
    let href = first_attr(row, &sel.link, "href");

    let mut result = MatchResult {
        url: href.as_ref().map(|h| format!("{SITE_ROOT}{h}")),
        match_id: href.as_deref().and_then(id_from_href),
        date: extract_date(row, sel, dates),
        event: extract_event(row, sel),
        team1: None,
        team1_id: None,
        team1score: None,
        team2: None,
        team2_id: None,
        team2score: None,
    };

    if row.select(&sel.team_cell).next().is_some() {
        result.team1 = nth_text(row, &sel.team_cell, 0);
        result.team2 = nth_text(row, &sel.team_cell, 1);

        if let Some(score) = row.select(&sel.score).next() {
            result.team1score = nth_text(score, &sel.span, 0).as_deref().and_then(parse_int);
            result.team2score = nth_text(score, &sel.span, 1).as_deref().and_then(parse_int);
        }
    }

    result
}

/// Date from the headline of the block the row sits in
fn extract_date(row: ElementRef, sel: &ResultSelectors, dates: &DateNormalizer) -> Option<String> {
    let block = row.parent().and_then(ElementRef::wrap);
    let headline = block.and_then(|b| first_text(b, &sel.headline));

    match headline {
        Some(text) => {
            let date = dates.normalize_results_heading(&text);
            if date.is_none() {
                warn!("Could not parse results heading '{}'", text);
            }
            date
        }
        None => Some(dates.today_fallback()),
    }
}

fn extract_event(row: ElementRef, sel: &ResultSelectors) -> Option<String> {
    row.select(&sel.placeholder_event)
        .next()
        .or_else(|| row.select(&sel.event).next())
        .map(|cell| text_of(cell).trim().to_string())
}
