use anyhow::Result;
use hltv_scraper::store::to_pretty_json;
use hltv_scraper::{HltvScraper, ScraperConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    hltv_scraper::init_logging();

    let config = ScraperConfig::from_env()?;
    let scraper = HltvScraper::new(config)?;

    let matches = match scraper.save_odds().await {
        Ok(matches) => matches,
        Err(e) => {
            error!("Failed to scrape odds: {:#}", e);
            return Err(e);
        }
    };

    for record in &matches {
        println!("{}", to_pretty_json(record)?);
    }

    info!("Wrote {} matches with odds", matches.len());
    Ok(())
}
