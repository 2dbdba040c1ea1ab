//! HLTV Scraper
//!
//! Scrapes match odds, team rankings, player stats and match results from
//! HLTV through a FlareSolverr rendering proxy and writes them to JSON files.
//! Results collection is paginated and resumes from the previous output.

pub mod config;
pub mod dates;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod hltv;
pub mod paginator;
pub mod store;
pub mod teams;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ScraperConfig;
pub use dates::DateNormalizer;
pub use fetcher::{PageFetcher, PageSource};
pub use hltv::HltvScraper;
pub use paginator::{PaginationOutcome, ResultPaginator, StopReason};
pub use teams::TeamDirectory;
pub use types::*;

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber, honouring `RUST_LOG` and defaulting to `info`
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
