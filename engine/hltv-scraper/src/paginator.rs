//! Offset-paginated, resumable results collection
//!
//! A run seeds its collection from the output file, walks
//! `<base>?offset=0, 100, 200, ...` until the listing runs dry, a fetch fails,
//! or the offset reaches `max_results`, then overwrites the output file with
//! everything it holds. Records are appended without deduplication, so
//! re-running over the same offsets repeats entries.

use crate::config::ScraperConfig;
use crate::dates::DateNormalizer;
use crate::extract::{extract_results, has_results};
use crate::fetcher::PageSource;
use crate::store;
use crate::teams::TeamDirectory;
use crate::types::MatchResult;
use anyhow::{Context, Result};
use scraper::Html;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};

/// Why a pagination run stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// A page without any results holder: the listing is exhausted
    EndOfListing,
    /// The page at `offset` could not be fetched or parsed
    Aborted { offset: u32 },
    /// The offset reached `max_results`
    LimitReached,
}

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct PaginationOutcome {
    pub pages_fetched: u32,
    pub appended: usize,
    pub stop: StopReason,
    /// Seeded records followed by everything appended, as written to disk
    pub records: Vec<MatchResult>,
}

enum State {
    Fetching { offset: u32 },
    Extracting { offset: u32, html: String },
    More { offset: u32 },
    Finished(StopReason),
}

/// Settings for one results collection run
#[derive(Debug, Clone)]
pub struct ResultPaginator {
    base_url: String,
    output: PathBuf,
    max_results: u32,
    page_size: u32,
    delay: Duration,
}

impl ResultPaginator {
    pub fn new(base_url: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            output: output.into(),
            max_results: 50_000,
            page_size: 100,
            delay: Duration::from_secs(1),
        }
    }

    pub fn from_config(config: &ScraperConfig, file_name: &str) -> Self {
        Self::new(config.pagination.results_url.clone(), config.output_path(file_name))
            .max_results(config.pagination.max_results)
            .page_size(config.pagination.page_size)
            .delay(config.page_delay())
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Offset step; zero is treated as one so the loop always advances
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn page_url(&self, offset: u32) -> String {
        format!("{}?offset={}", self.base_url, offset)
    }

    /// Upper bound on fetch cycles: `ceil(max_results / page_size)`
    pub fn max_pages(&self) -> u32 {
        self.max_results.div_ceil(self.page_size)
    }

    /// Collect results and overwrite the output file
    ///
    /// Only a failed write is an error; fetch failures end the run early and
    /// what was gathered so far is still saved.
    pub async fn run<S: PageSource + ?Sized>(
        &self,
        source: &S,
        teams: &mut TeamDirectory,
        dates: &DateNormalizer,
    ) -> Result<PaginationOutcome> {
        info!("Starting to fetch results");

        let mut records: Vec<MatchResult> = store::load_collection(&self.output).await;
        let seeded = records.len();
        let mut pages_fetched = 0;

        let mut state = State::Fetching { offset: 0 };
        let stop = loop {
            state = match state {
                State::Fetching { offset } if offset >= self.max_results => {
                    State::Finished(StopReason::LimitReached)
                }
                State::Fetching { offset } => {
                    let url = self.page_url(offset);
                    info!("Fetching results from URL: {}", url);
                    match source.fetch_html(&url).await {
                        Some(html) => {
                            pages_fetched += 1;
                            State::Extracting { offset, html }
                        }
                        None => {
                            warn!("No results fetched or failed to parse page. Stopping");
                            State::Finished(StopReason::Aborted { offset })
                        }
                    }
                }
                State::Extracting { offset, html } => match self.extract_page(&html, dates) {
                    Ok(Some(rows)) => {
                        for mut row in rows {
                            if let Some(name) = row.team1.clone() {
                                row.team1_id = teams.resolve(source, &name).await;
                            }
                            if let Some(name) = row.team2.clone() {
                                row.team2_id = teams.resolve(source, &name).await;
                            }
                            records.push(row);
                        }
                        info!("Processed offset {}. Total results collected: {}", offset, records.len());
                        State::More { offset }
                    }
                    Ok(None) => {
                        info!("No more results found on this page. Ending fetch loop");
                        State::Finished(StopReason::EndOfListing)
                    }
                    Err(e) => {
                        error!("Failed to extract results at offset {}: {}", offset, e);
                        State::Finished(StopReason::Aborted { offset })
                    }
                },
                State::More { offset } => {
                    let next = offset.saturating_add(self.page_size);
                    if next < self.max_results && !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                    State::Fetching { offset: next }
                }
                State::Finished(reason) => break reason,
            };
        };

        store::write_collection(&self.output, &records)
            .await
            .with_context(|| format!("Failed to save results to {:?}", self.output))?;
        info!("Finished fetching results ({:?})", stop);

        Ok(PaginationOutcome { pages_fetched, appended: records.len() - seeded, stop, records })
    }

    /// Rows of one page, or `None` when the listing has ended
    fn extract_page(&self, html: &str, dates: &DateNormalizer) -> Result<Option<Vec<MatchResult>>> {
        let document = Html::parse_document(html);
        if !has_results(&document)? {
            return Ok(None);
        }
        extract_results(&document, dates).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::LocalZone;
    use crate::teams::TEAM_LISTING_URL;
    use crate::testing::{FakeSource, EMPTY_RESULTS_PAGE, RESULTS_PAGE, TEAM_LISTING_PAGE};
    use chrono_tz::Europe;
    use tempfile::TempDir;

    const BASE: &str = "https://www.hltv.org/results";

    fn dates() -> DateNormalizer {
        DateNormalizer::new(Europe::Copenhagen, LocalZone::Named(Europe::Copenhagen))
    }

    fn paginator(dir: &TempDir, max_results: u32) -> ResultPaginator {
        ResultPaginator::new(BASE, dir.path().join("results.json"))
            .max_results(max_results)
            .delay(Duration::ZERO)
    }

    #[test]
    fn test_page_bounds() {
        let p = ResultPaginator::new(BASE, "results.json").max_results(250);
        assert_eq!(p.page_url(200), "https://www.hltv.org/results?offset=200");
        assert_eq!(p.max_pages(), 3);
        assert_eq!(p.clone().max_results(300).max_pages(), 3);
        assert_eq!(p.clone().max_results(0).max_pages(), 0);
    }

    #[tokio::test]
    async fn test_bounded_when_every_page_has_results() {
        let dir = TempDir::new().unwrap();
        let source = FakeSource::new()
            .with_page(TEAM_LISTING_URL, TEAM_LISTING_PAGE)
            .with_fallback(RESULTS_PAGE);
        let mut teams = TeamDirectory::new();

        let p = paginator(&dir, 250);
        let outcome = p.run(&source, &mut teams, &dates()).await.unwrap();

        assert_eq!(outcome.stop, StopReason::LimitReached);
        assert_eq!(outcome.pages_fetched, 3);
        assert_eq!(outcome.pages_fetched, p.max_pages());
        assert_eq!(outcome.appended, 6);

        let result_urls: Vec<String> =
            source.requested().into_iter().filter(|u| u.starts_with(BASE)).collect();
        assert_eq!(
            result_urls,
            vec![format!("{BASE}?offset=0"), format!("{BASE}?offset=100"), format!("{BASE}?offset=200")]
        );
    }

    #[tokio::test]
    async fn test_resolves_team_ids() {
        let dir = TempDir::new().unwrap();
        let source = FakeSource::new()
            .with_page(TEAM_LISTING_URL, TEAM_LISTING_PAGE)
            .with_page(&format!("{BASE}?offset=0"), RESULTS_PAGE)
            .with_page(&format!("{BASE}?offset=100"), EMPTY_RESULTS_PAGE);
        let mut teams = TeamDirectory::new();

        let outcome = paginator(&dir, 50_000).run(&source, &mut teams, &dates()).await.unwrap();

        assert_eq!(outcome.stop, StopReason::EndOfListing);
        assert_eq!(outcome.pages_fetched, 2);

        let first = &outcome.records[0];
        assert_eq!(first.team1.as_deref(), Some("Team A"));
        assert_eq!(first.team1_id, Some(5));
        assert_eq!(first.team1score, Some(16));
        assert_eq!(first.team2.as_deref(), Some("Team B"));
        assert_eq!(first.team2_id, Some(9));
        assert_eq!(first.team2score, Some(10));

        // Row without team cells never triggers a lookup
        assert_eq!(outcome.records[1].team1_id, None);
    }

    #[tokio::test]
    async fn test_fetch_failure_flushes_partial_results() {
        let dir = TempDir::new().unwrap();
        let source = FakeSource::new()
            .with_page(TEAM_LISTING_URL, TEAM_LISTING_PAGE)
            .with_page(&format!("{BASE}?offset=0"), RESULTS_PAGE);
        let mut teams = TeamDirectory::new();

        let p = paginator(&dir, 50_000);
        let outcome = p.run(&source, &mut teams, &dates()).await.unwrap();

        assert_eq!(outcome.stop, StopReason::Aborted { offset: 100 });
        assert_eq!(outcome.appended, 2);

        let saved: Vec<MatchResult> = store::load_collection(dir.path().join("results.json")).await;
        assert_eq!(saved, outcome.records);
    }

    #[tokio::test]
    async fn test_resume_appends_without_dedup() {
        let dir = TempDir::new().unwrap();
        let source = FakeSource::new()
            .with_page(TEAM_LISTING_URL, TEAM_LISTING_PAGE)
            .with_page(&format!("{BASE}?offset=0"), RESULTS_PAGE)
            .with_page(&format!("{BASE}?offset=100"), EMPTY_RESULTS_PAGE);

        let p = paginator(&dir, 50_000);
        let first = p.run(&source, &mut TeamDirectory::new(), &dates()).await.unwrap();
        let second = p.run(&source, &mut TeamDirectory::new(), &dates()).await.unwrap();

        assert_eq!(first.records.len(), 2);
        assert_eq!(second.appended, 2);
        assert_eq!(second.records.len(), 4);
        assert_eq!(second.records[0].match_id, second.records[2].match_id);
    }

    #[tokio::test]
    async fn test_corrupt_seed_starts_empty() {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(dir.path().join("results.json"), "{not json").await.unwrap();
        let source = FakeSource::new().with_page(&format!("{BASE}?offset=0"), EMPTY_RESULTS_PAGE);

        let outcome =
            paginator(&dir, 50_000).run(&source, &mut TeamDirectory::new(), &dates()).await.unwrap();

        assert_eq!(outcome.stop, StopReason::EndOfListing);
        assert!(outcome.records.is_empty());
        let saved = tokio::fs::read_to_string(dir.path().join("results.json")).await.unwrap();
        assert_eq!(saved, "[]");
    }

    #[tokio::test]
    async fn test_foreign_seed_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.json");
        // Parseable JSON, but match-id is not a number
        tokio::fs::write(&path, r#"[{"match-id": "2370001", "team1": "Team A"}]"#).await.unwrap();
        let source = FakeSource::new()
            .with_page(TEAM_LISTING_URL, TEAM_LISTING_PAGE)
            .with_page(&format!("{BASE}?offset=0"), RESULTS_PAGE)
            .with_page(&format!("{BASE}?offset=100"), EMPTY_RESULTS_PAGE);

        let outcome = paginator(&dir, 50_000).run(&source, &mut TeamDirectory::new(), &dates()).await.unwrap();

        assert_eq!(outcome.appended, 2);
        assert_eq!(outcome.records.len(), 2);
        let saved: Vec<MatchResult> = store::load_collection(&path).await;
        assert_eq!(saved, outcome.records);
        assert_eq!(saved[0].match_id, Some(2370001));
    }

    #[tokio::test]
    async fn test_zero_limit_fetches_nothing() {
        let dir = TempDir::new().unwrap();
        let source = FakeSource::new().with_fallback(RESULTS_PAGE);

        let outcome = paginator(&dir, 0).run(&source, &mut TeamDirectory::new(), &dates()).await.unwrap();

        assert_eq!(outcome.stop, StopReason::LimitReached);
        assert_eq!(source.calls(), 0);
    }
}
