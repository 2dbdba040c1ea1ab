use super::{first_attr, non_empty, nth_text, selector, text_of};
use crate::types::{OddsRecord, MISSING_ODD};
use anyhow::Result;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Both prices offered by one bookmaker column
#[derive(Debug, Default)]
struct ProviderOdds {
    first: Option<String>,
    second: Option<String>,
}

impl ProviderOdds {
    fn read(table: ElementRef, cell: &Selector) -> Self {
        Self {
            first: non_empty(nth_text(table, cell, 0)),
            second: non_empty(nth_text(table, cell, 1)),
        }
    }

    fn any(&self) -> bool {
        self.first.is_some() || self.second.is_some()
    }
}

fn or_missing(odd: Option<String>) -> String {
    odd.unwrap_or_else(|| MISSING_ODD.to_string())
}

/// Matches on the betting page that carry at least one bookmaker price
pub fn extract_odds(document: &Html) -> Result<Vec<OddsRecord>> {
    let container = selector("div.b-match-container")?;
    let match_table = selector("table.bookmakerMatch")?;
    let analytics = selector("a.a-reset")?;
    let team_name = selector("div.team-name")?;
    let betsson = selector("td.b-list-odds-provider-betsson")?;
    let leovegas = selector("td.b-list-odds-provider-leovegas")?;
    let unibet = selector("td.b-list-odds-provider-unibet")?;

    let mut matches = Vec::new();

    for day in document.select(&container) {
        for table in day.select(&match_table) {
            let nordic = ProviderOdds::read(table, &betsson);
            let leo = ProviderOdds::read(table, &leovegas);
            let uni = ProviderOdds::read(table, &unibet);

            let team1 = table.select(&team_name).next().map(text_of);
            let team2 = table.select(&team_name).nth(1).map(text_of);

            if !(nordic.any() || leo.any() || uni.any()) {
                debug!("Skipping {:?} vs {:?}: no bookmaker odds", team1, team2);
                continue;
            }

            matches.push(OddsRecord {
                team1,
                team2,
                leovegas1: or_missing(leo.first),
                leovegas2: or_missing(leo.second),
                nordic1: or_missing(nordic.first),
                nordic2: or_missing(nordic.second),
                unibet1: or_missing(uni.first),
                unibet2: or_missing(uni.second),
                href: first_attr(table, &analytics, "href"),
            });
        }
    }

    Ok(matches)
}
