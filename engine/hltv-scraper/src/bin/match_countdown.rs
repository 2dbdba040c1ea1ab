use anyhow::Result;
use clap::Parser;
use hltv_scraper::{HltvScraper, ScraperConfig};

/// Print the time left before an HLTV match starts
#[derive(Parser, Debug)]
#[command(name = "match_countdown")]
struct Args {
    /// HLTV match ID (the number in /matches/<id>/...)
    match_id: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    hltv_scraper::init_logging();

    let config = ScraperConfig::from_env()?;
    let scraper = HltvScraper::new(config)?;

    match scraper.get_match_countdown(args.match_id).await {
        Some(countdown) => println!("{countdown}"),
        None => println!("No upcoming start time for match {}", args.match_id),
    }

    Ok(())
}
