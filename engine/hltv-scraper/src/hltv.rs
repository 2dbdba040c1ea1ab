use anyhow::{Context, Result};
use tracing::{error, info};

use crate::config::ScraperConfig;
use crate::dates::{format_countdown, DateNormalizer};
use crate::extract::{extract_match_time, extract_odds, extract_ranking, extract_top_players, extract_top_teams};
use crate::fetcher::{get_parsed_page, PageFetcher, PageSource};
use crate::paginator::{PaginationOutcome, ResultPaginator};
use crate::store;
use crate::teams::TeamDirectory;
use crate::types::{OddsRecord, RankedTeam, TopPlayer, TopTeam};

pub const HOME_URL: &str = "https://hltv.org/";
pub const ODDS_URL: &str = "http://www.hltv.org/betting/money";
pub const RANKING_URL: &str = "https://www.hltv.org/ranking/teams/";
pub const STATS_URL: &str = "https://www.hltv.org/stats";

pub const RANKING_FILE: &str = "ranking.json";
pub const RESULTS_FILE: &str = "results.json";
pub const UPCOMING_FILE: &str = "upcoming.json";

/// HLTV scraper context
///
/// Owns the page source, the team directory and the date normalizer for one
/// run; every pipeline goes through it.
pub struct HltvScraper<S = PageFetcher> {
    config: ScraperConfig,
    source: S,
    teams: TeamDirectory,
    dates: DateNormalizer,
}

impl HltvScraper<PageFetcher> {
    /// Create a scraper talking to the configured rendering proxy
    pub fn new(config: ScraperConfig) -> Result<Self> {
        let fetcher = PageFetcher::new(&config)?;
        Self::with_source(config, fetcher)
    }
}

impl<S: PageSource> HltvScraper<S> {
    pub fn with_source(config: ScraperConfig, source: S) -> Result<Self> {
        let dates = DateNormalizer::from_config(&config).context("Invalid timezone configuration")?;
        Ok(Self { config, source, teams: TeamDirectory::new(), dates })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    pub fn teams(&self) -> &TeamDirectory {
        &self.teams
    }

    pub fn dates(&self) -> &DateNormalizer {
        &self.dates
    }

    /// Team ID by exact display name
    pub async fn find_team_id(&mut self, name: &str) -> Option<u32> {
        self.teams.resolve(&self.source, name).await
    }

    /// Upcoming matches with at least one bookmaker price
    pub async fn get_odds(&self) -> Result<Vec<OddsRecord>> {
        info!("Fetching odds");
        let page = get_parsed_page(&self.source, ODDS_URL).await.context("Failed to fetch odds page")?;
        let odds = extract_odds(&page)?;
        info!("Found {} matches with odds", odds.len());
        Ok(odds)
    }

    /// Scrape odds and overwrite `upcoming.json`
    pub async fn save_odds(&self) -> Result<Vec<OddsRecord>> {
        let odds = self.get_odds().await?;
        let path = self.config.output_path(UPCOMING_FILE);
        store::write_collection(&path, &odds)
            .await
            .with_context(|| format!("Failed to save odds to {path:?}"))?;
        Ok(odds)
    }

    /// Home page top-5 with team IDs
    pub async fn top5teams(&mut self) -> Result<Vec<TopTeam>> {
        info!("Fetching top 5 teams");
        let mut teams = {
            let home = get_parsed_page(&self.source, HOME_URL).await.context("Failed to fetch home page")?;
            extract_top_teams(&home)?
        };

        for team in &mut teams {
            team.id = self.teams.resolve(&self.source, &team.name).await;
        }

        info!("Top 5 teams fetched: {:?}", teams);
        Ok(teams)
    }

    /// World ranking with team IDs; overwrites `ranking.json`
    ///
    /// The existing file is read first but its contents do not carry over:
    /// the saved ranking is always exactly what the page shows now.
    pub async fn top30teams(&mut self) -> Result<Vec<RankedTeam>> {
        info!("Fetching top 30 teams");
        let path = self.config.output_path(RANKING_FILE);
        let previous: Vec<RankedTeam> = store::load_collection(&path).await;
        info!("Discarding {} previously saved ranking entries", previous.len());

        let mut ranking = {
            let page = get_parsed_page(&self.source, RANKING_URL).await.context("Failed to fetch ranking page")?;
            extract_ranking(&page)?
        };

        for team in &mut ranking {
            if let Some(name) = team.name.clone() {
                team.team_id = self.teams.resolve(&self.source, &name).await;
            }
        }

        store::write_collection(&path, &ranking)
            .await
            .with_context(|| format!("Failed to save ranking to {path:?}"))?;
        info!("Top 30 teams ranking saved to {:?}", path);
        Ok(ranking)
    }

    /// Featured players from the stats landing page
    pub async fn top_players(&self) -> Result<Vec<TopPlayer>> {
        info!("Fetching top players");
        let page = get_parsed_page(&self.source, STATS_URL).await.context("Failed to fetch stats page")?;
        let players = extract_top_players(&page)?;
        info!("Top players fetched: {}", players.len());
        Ok(players)
    }

    /// Paginated results collection into `results.json`
    pub async fn get_results(&mut self) -> Result<PaginationOutcome> {
        let paginator = ResultPaginator::from_config(&self.config, RESULTS_FILE);
        let outcome = paginator.run(&self.source, &mut self.teams, &self.dates).await?;
        info!(
            "Results run stopped ({:?}) after {} pages: {} appended, {} total",
            outcome.stop,
            outcome.pages_fetched,
            outcome.appended,
            outcome.records.len()
        );
        Ok(outcome)
    }

    /// Time left before a match starts, e.g. `"2:30:00"`
    ///
    /// `None` when the page is unavailable, carries no date, or the match
    /// has already started.
    pub async fn get_match_countdown(&self, match_id: u32) -> Option<String> {
        info!("Fetching match countdown for match ID: {}", match_id);
        let url = format!("https://www.hltv.org/matches/{match_id}/page");

        let Some(page) = get_parsed_page(&self.source, &url).await else {
            error!("Failed to fetch match page for match ID: {}", match_id);
            return None;
        };

        let time = match extract_match_time(&page) {
            Ok(Some(time)) => time,
            Ok(None) => {
                error!("Match page for {} has no date and time", match_id);
                return None;
            }
            Err(e) => {
                error!("Failed to read match page for {}: {}", match_id, e);
                return None;
            }
        };

        let countdown = self
            .dates
            .countdown(&time.date, &time.time, self.dates.now_local())
            .map(format_countdown);
        info!("Countdown for match ID {}: {:?}", match_id, countdown);
        countdown
    }
}
