use super::{first_text, selector};
use crate::types::MatchTime;
use anyhow::Result;
use scraper::Html;

/// Date and time text from a match page's `timeAndEvent` block
pub fn extract_match_time(document: &Html) -> Result<Option<MatchTime>> {
    let block = selector("div.timeAndEvent")?;
    let date = selector("div.date")?;
    let time = selector("div.time")?;

    Ok(document.select(&block).next().and_then(|b| {
        Some(MatchTime { date: first_text(b, &date)?, time: first_text(b, &time)? })
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MATCH_PAGE;

    #[test]
    fn test_extract_match_time() {
        let document = Html::parse_document(MATCH_PAGE);
        let time = extract_match_time(&document).unwrap().unwrap();
        assert_eq!(time.date, "3rd of May 2024");
        assert_eq!(time.time, "20:30");
    }

    #[test]
    fn test_missing_block() {
        let document = Html::parse_document("<div class=\"timeAndEvent\"><div class=\"time\">20:30</div></div>");
        assert!(extract_match_time(&document).unwrap().is_none());
    }
}
