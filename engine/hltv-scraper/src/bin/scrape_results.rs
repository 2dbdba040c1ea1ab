use anyhow::Result;
use hltv_scraper::{HltvScraper, ScraperConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    hltv_scraper::init_logging();

    info!("Script started");

    let config = ScraperConfig::from_env()?;
    let mut scraper = HltvScraper::new(config)?;

    let run = async {
        scraper.top30teams().await?;
        scraper.get_results().await
    };

    match run.await {
        Ok(outcome) => {
            info!(
                "Script finished successfully: {} results saved ({} new)",
                outcome.records.len(),
                outcome.appended
            );
            Ok(())
        }
        Err(e) => {
            error!("An error occurred: {:#}", e);
            Err(e)
        }
    }
}
