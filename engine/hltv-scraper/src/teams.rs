//! Team name → team ID directory
//!
//! The directory is filled from the team statistics listing the first time a
//! name is resolved and kept for the lifetime of the owning scraper. There is
//! no refresh: a team that appears mid-run stays unresolved.

use crate::extract::{id_from_href, selector, text_of, SITE_ROOT};
use crate::fetcher::{get_parsed_page, PageSource};
use crate::types::Team;
use anyhow::Result;
use scraper::Html;
use tracing::{debug, error, info, warn};

/// Listing of every team with at least zero maps played
pub const TEAM_LISTING_URL: &str = "https://www.hltv.org/stats/teams?minMapCount=0";

/// Lazily loaded team directory
pub struct TeamDirectory {
    listing_url: String,
    teams: Option<Vec<Team>>,
}

impl Default for TeamDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl TeamDirectory {
    pub fn new() -> Self {
        Self::with_listing_url(TEAM_LISTING_URL)
    }

    pub fn with_listing_url(url: impl Into<String>) -> Self {
        Self { listing_url: url.into(), teams: None }
    }

    /// Directory pre-filled with known teams; never fetches
    pub fn from_teams(teams: Vec<Team>) -> Self {
        Self { listing_url: TEAM_LISTING_URL.to_string(), teams: Some(teams) }
    }

    pub fn is_loaded(&self) -> bool {
        self.teams.is_some()
    }

    /// Cached teams, empty until the first lookup
    pub fn teams(&self) -> &[Team] {
        self.teams.as_deref().unwrap_or_default()
    }

    /// Fetch the listing once; later calls are no-ops
    ///
    /// A failed fetch still marks the directory loaded (with no teams) so the
    /// proxy is not asked again for every lookup.
    pub async fn ensure_loaded<S: PageSource + ?Sized>(&mut self, source: &S) {
        if self.teams.is_some() {
            return;
        }

        info!("Fetching all teams");
        let teams = match get_parsed_page(source, &self.listing_url).await {
            Some(document) => parse_team_listing(&document).unwrap_or_else(|e| {
                error!("Failed to parse team listing: {}", e);
                Vec::new()
            }),
            None => {
                error!("Team listing unavailable; team IDs will not be resolved this run");
                Vec::new()
            }
        };

        info!("Loaded {} teams", teams.len());
        self.teams = Some(teams);
    }

    /// Exact, case-sensitive name lookup, loading the listing on first use
    pub async fn resolve<S: PageSource + ?Sized>(&mut self, source: &S, name: &str) -> Option<u32> {
        self.ensure_loaded(source).await;
        self.lookup(name)
    }

    /// Lookup against whatever is cached, without fetching
    pub fn lookup(&self, name: &str) -> Option<u32> {
        debug!("Finding team ID for {}", name);
        match self.teams().iter().find(|team| team.name == name) {
            Some(team) => {
                debug!("Found team ID for {}: {}", name, team.id);
                Some(team.id)
            }
            None => {
                warn!("Team ID for {} not found", name);
                None
            }
        }
    }
}

/// Every team row of the statistics listing, in page order
pub fn parse_team_listing(document: &Html) -> Result<Vec<Team>> {
    let cell = selector("td.teamCol-teams-overview")?;
    let link = selector("a")?;

    let mut teams = Vec::new();
    for row in document.select(&cell) {
        let Some(anchor) = row.select(&link).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(id) = id_from_href(href) else {
            warn!("Skipping team link without an ID: {}", href);
            continue;
        };

        teams.push(Team { id, name: text_of(anchor), url: format!("{SITE_ROOT}{href}") });
    }

    Ok(teams)
}
