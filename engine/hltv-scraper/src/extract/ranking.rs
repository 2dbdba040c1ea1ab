use super::{
    first_attr, first_text, id_from_href, parse_int, path_segment, selector, text_of, SITE_ROOT,
    SITE_ROOT_WWW,
};
use crate::types::{RankedPlayer, RankedTeam, TopTeam};
use anyhow::Result;
use scraper::{ElementRef, Html, Selector};

struct RankingSelectors {
    team: Selector,
    header_name: Selector,
    position: Selector,
    points: Selector,
    details: Selector,
    player: Selector,
    picture: Selector,
    pointer: Selector,
}

impl RankingSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            team: selector("div.ranked-team.standard-box")?,
            header_name: selector("div.ranking-header .name")?,
            position: selector(".position")?,
            points: selector("span.points")?,
            details: selector("a.details.moreLink")?,
            player: selector("td.player-holder")?,
            picture: selector("img.playerPicture")?,
            pointer: selector(".pointer")?,
        })
    }
}

/// Teams of the world ranking page, in ranking order
///
/// Team IDs are left empty; they come from the team directory.
pub fn extract_ranking(document: &Html) -> Result<Vec<RankedTeam>> {
    let ranking = selector("div.ranking")?;
    let sel = RankingSelectors::new()?;

    let Some(board) = document.select(&ranking).next() else {
        return Ok(Vec::new());
    };

    Ok(board.select(&sel.team).map(|team| parse_ranked_team(team, &sel)).collect())
}

fn parse_ranked_team(team: ElementRef, sel: &RankingSelectors) -> RankedTeam {
    let name = first_text(team, &sel.header_name);
    let details = first_attr(team, &sel.details, "href");

    let team_url = match (&details, &name) {
        (Some(href), Some(name)) => path_segment(href, 1).map(|slug| format!("{SITE_ROOT}/team/{slug}/{name}")),
        _ => None,
    };

    RankedTeam {
        rank: first_text(team, &sel.position).as_deref().and_then(parse_int),
        rank_points: first_text(team, &sel.points).as_deref().and_then(parse_int),
        team_id: None,
        team_url,
        stats_url: details.as_ref().map(|href| format!("{SITE_ROOT_WWW}{href}")),
        team_players: team.select(&sel.player).map(|p| parse_player(p, sel)).collect(),
        name,
    }
}

fn parse_player(holder: ElementRef, sel: &RankingSelectors) -> RankedPlayer {
    let href = first_attr(holder, &sel.pointer, "href");
    RankedPlayer {
        name: first_attr(holder, &sel.picture, "title"),
        player_id: href.as_deref().and_then(id_from_href),
        url: href.map(|h| format!("{SITE_ROOT_WWW}{h}")),
    }
}

/// The five teams in the home page ranking box
///
/// Each box's text starts with its three-character rank label (`"#1 "`),
/// which is dropped from the name. Team IDs are left empty.
pub fn extract_top_teams(document: &Html) -> Result<Vec<TopTeam>> {
    let rank_box = selector("div.col-box.rank")?;
    let link = selector("a")?;

    Ok(document
        .select(&rank_box)
        .map(|team| {
            let name: String = text_of(team).trim_start().chars().skip(3).collect();
            let url = team
                .select(&link)
                .nth(1)
                .and_then(|a| a.value().attr("href"))
                .map(|href| format!("{SITE_ROOT}{href}"));
            TopTeam { id: None, name: name.trim().to_string(), url }
        })
        .collect())
}
