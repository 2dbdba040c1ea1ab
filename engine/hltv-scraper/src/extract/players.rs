use super::{first_attr, first_text, id_from_href, selector, SITE_ROOT};
use crate::types::TopPlayer;
use anyhow::Result;
use scraper::Html;

/// Featured players from the first column of the stats landing page
pub fn extract_top_players(document: &Html) -> Result<Vec<TopPlayer>> {
    let column = selector("div.col")?;
    let card = selector("div.top-x-box.standard-box")?;
    let img = selector("img")?;
    let portrait = selector("img.img")?;
    let name_link = selector("a.name")?;
    let rating = selector("div.rating span.bold")?;
    let maps = selector("div.average.gtSmartphone-only span.bold")?;

    let Some(first_column) = document.select(&column).next() else {
        return Ok(Vec::new());
    };

    Ok(first_column
        .select(&card)
        .map(|player| {
            let href = first_attr(player, &name_link, "href");
            TopPlayer {
                country: player.select(&img).nth(1).and_then(|i| i.value().attr("alt")).map(str::to_string),
                name: first_attr(player, &portrait, "alt").map(|alt| full_name(&alt)),
                nickname: first_text(player, &name_link),
                rating: first_text(player, &rating),
                maps_played: first_text(player, &maps),
                url: href.as_ref().map(|h| format!("{SITE_ROOT}{h}")),
                id: href.as_deref().and_then(id_from_href),
            }
        })
        .collect())
}

/// `"Mathieu 'ZywOo' Herbaut"` → `"Mathieu Herbaut"`
fn full_name(alt: &str) -> String {
    let parts: Vec<&str> = alt.split('\'').collect();
    if parts.len() >= 3 {
        format!("{}{}", parts[0].trim_end(), parts[2])
    } else {
        alt.to_string()
    }
}
