//! In-memory page source and page fixtures for tests

use crate::fetcher::PageSource;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Serves canned HTML by URL and records every request
#[derive(Default)]
pub struct FakeSource {
    pages: HashMap<String, String>,
    fallback: Option<String>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Page served for any URL without an exact entry
    pub fn with_fallback(mut self, html: &str) -> Self {
        self.fallback = Some(html.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for FakeSource {
    async fn fetch_html(&self, url: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().or_else(|| self.fallback.clone())
    }
}

pub const RESULTS_PAGE: &str = r#"
<html><body>
<div class="results-holder">
  <div class="results-all">
    <div class="results-sublist">
      <span class="standard-headline">Results for May 3rd 2024</span>
      <div class="result-con">
        <a class="a-reset" href="/matches/2370001/team-a-vs-team-b-some-cup">
          <div class="result"><table><tbody><tr>
            <td class="team-cell"><div class="line-align team1"><div class="team">Team A</div></div></td>
            <td class="result-score"><span class="score-won">16</span> - <span class="score-lost">10</span></td>
            <td class="team-cell"><div class="line-align team2"><div class="team">Team B</div></div></td>
            <td class="event"><span class="event-name">Some Cup</span></td>
          </tr></tbody></table></div>
        </a>
      </div>
      <div class="result-con">
        <a class="a-reset" href="/matches/2370002/team-c-vs-team-d-some-cup">
          <div class="result"><table><tbody><tr>
            <td class="placeholder-text-cell">Some Showmatch</td>
          </tr></tbody></table></div>
        </a>
      </div>
    </div>
  </div>
</div>
</body></html>
"#;

/// A results page past the end of the listing
pub const EMPTY_RESULTS_PAGE: &str = r#"<html><body><div class="results"><p>No results</p></div></body></html>"#;

pub const TEAM_LISTING_PAGE: &str = r#"
<html><body><table class="stats-table player-ratings-table"><tbody>
  <tr><td class="teamCol-teams-overview"><img src="a.png"><a href="/stats/teams/5/team-a">Team A</a></td></tr>
  <tr><td class="teamCol-teams-overview"><img src="b.png"><a href="/stats/teams/9/team-b">Team B</a></td></tr>
  <tr><td class="teamCol-teams-overview"><a href="/stats/teams/77/team-a-academy">Team A</a></td></tr>
  <tr><td class="teamCol-teams-overview"><a href="/stats/teams/broken">Broken</a></td></tr>
</tbody></table></body></html>
"#;

pub const ODDS_PAGE: &str = r#"
<html><body>
<div class="b-match-container">
  <table class="bookmakerMatch"><tbody><tr>
    <td class="b-list-odds-team"><a class="a-reset" href="/betting/analytics/2370100/team-a-vs-team-b">
      <div class="team-name">Team A</div><div class="team-name">Team B</div></a></td>
    <td class="b-list-odds-provider-betsson">1.85</td>
    <td class="b-list-odds-provider-leovegas"></td>
    <td class="b-list-odds-provider-leovegas"> </td>
  </tr></tbody></table>
  <table class="bookmakerMatch"><tbody><tr>
    <td class="b-list-odds-team"><a class="a-reset" href="/betting/analytics/2370101/team-c-vs-team-d">
      <div class="team-name">Team C</div><div class="team-name">Team D</div></a></td>
    <td class="b-list-odds-provider-betsson">1.38</td>
    <td class="b-list-odds-provider-betsson">3.00</td>
    <td class="b-list-odds-provider-leovegas">1.40</td>
    <td class="b-list-odds-provider-leovegas">2.90</td>
    <td class="b-list-odds-provider-unibet"> 1.42 </td>
    <td class="b-list-odds-provider-unibet">2.85</td>
  </tr></tbody></table>
</div>
<div class="b-match-container">
  <table class="bookmakerMatch"><tbody><tr>
    <td class="b-list-odds-team"><a class="a-reset" href="/betting/analytics/2370102/team-e-vs-team-f">
      <div class="team-name">Team E</div><div class="team-name">Team F</div></a></td>
    <td class="b-list-odds-provider-betsson"></td>
    <td class="b-list-odds-provider-unibet"></td>
  </tr></tbody></table>
</div>
</body></html>
"#;

pub const RANKING_PAGE: &str = r#"
<html><body>
<div class="ranking">
  <div class="ranked-team standard-box">
    <div class="ranking-header">
      <span class="position">#1</span>
      <div class="relative"><div class="teamLine"><span class="name">Team A</span><span class="points">(912 points)</span></div></div>
    </div>
    <div class="lineup-con"><table class="lineup"><tbody><tr>
      <td class="player-holder"><a class="pointer" href="/player/101/alpha"><img class="playerPicture" title="Alpha" src="p1.png"></a></td>
      <td class="player-holder"><a class="pointer" href="/player/102/bravo"><img class="playerPicture" title="Bravo" src="p2.png"></a></td>
    </tr></tbody></table></div>
    <div class="more"><a class="details moreLink" href="/stats/teams/5/team-a">Stats</a></div>
  </div>
  <div class="ranked-team standard-box">
    <div class="ranking-header">
      <span class="position">#2</span>
      <div class="relative"><div class="teamLine"><span class="name">Team B</span></div></div>
    </div>
  </div>
</div>
</body></html>
"#;

pub const HOME_PAGE: &str = r#"
<html><body><div class="rankings">
  <div class="col-box rank"><span class="rank-num">#1 </span><a href="/team/5/team-a"><img src="a.png"></a><a href="/team/5/team-a">Team A</a></div>
  <div class="col-box rank"><span class="rank-num">#2 </span><a href="/team/9/team-b"><img src="b.png"></a><a href="/team/9/team-b">Team B</a></div>
</div></body></html>
"#;

pub const STATS_PAGE: &str = r#"
<html><body>
<div class="col">
  <div class="top-x-box standard-box">
    <a href="/stats/players/11893/zywoo"><img class="img" alt="Mathieu 'ZywOo' Herbaut" src="z.png"></a>
    <img class="flag" alt="France" src="fr.gif">
    <a class="name" href="/stats/players/11893/zywoo">ZywOo</a>
    <div class="rating">Rating 2.0 <span class="bold">1.31</span></div>
    <div class="average gtSmartphone-only">Maps <span class="bold">120</span></div>
  </div>
</div>
<div class="col">
  <div class="top-x-box standard-box">
    <a class="name" href="/stats/players/7998/s1mple">s1mple</a>
  </div>
</div>
</body></html>
"#;

pub const MATCH_PAGE: &str = r#"
<html><body><div class="teamsBox">
  <div class="timeAndEvent">
    <div class="time" data-unix="1714761000000">20:30</div>
    <div class="date" data-unix="1714761000000">3rd of May 2024</div>
    <div class="event text-ellipsis"><a href="/events/1/some-cup">Some Cup</a></div>
  </div>
</div></body></html>
"#;
