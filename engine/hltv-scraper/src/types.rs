use serde::{Deserialize, Serialize};

/// Placeholder written for a bookmaker column with no price
pub const MISSING_ODD: &str = "N/A";

/// A team as listed on the team statistics page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// HLTV team ID
    pub id: u32,
    /// Display name (e.g., "Vitality")
    pub name: String,
    /// Team stats page
    pub url: String,
}

/// One finished match from the results listing
///
/// Every field degrades to `None` independently when the row lacks the
/// markup it is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub url: Option<String>,
    #[serde(rename = "match-id")]
    pub match_id: Option<u32>,
    /// `YYYY-MM-DD`, or `D/M/YYYY` when the block had no date heading
    pub date: Option<String>,
    pub event: Option<String>,
    pub team1: Option<String>,
    #[serde(rename = "team1-id")]
    pub team1_id: Option<u32>,
    pub team1score: Option<u32>,
    pub team2: Option<String>,
    #[serde(rename = "team2-id")]
    pub team2_id: Option<u32>,
    pub team2score: Option<u32>,
}

/// Bookmaker prices for an upcoming match
///
/// `nordic*` holds the betsson column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsRecord {
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub leovegas1: String,
    pub leovegas2: String,
    pub nordic1: String,
    pub nordic2: String,
    pub unibet1: String,
    pub unibet2: String,
    pub href: Option<String>,
}

/// A player on a ranked team's lineup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPlayer {
    pub name: Option<String>,
    #[serde(rename = "player-id")]
    pub player_id: Option<u32>,
    pub url: Option<String>,
}

/// One entry of the world ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RankedTeam {
    pub name: Option<String>,
    pub rank: Option<u32>,
    pub rank_points: Option<u32>,
    pub team_id: Option<u32>,
    pub team_url: Option<String>,
    pub stats_url: Option<String>,
    pub team_players: Vec<RankedPlayer>,
}

/// An entry of the home page top-5 box
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTeam {
    pub id: Option<u32>,
    pub name: String,
    pub url: Option<String>,
}

/// A featured player from the stats landing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TopPlayer {
    pub country: Option<String>,
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub rating: Option<String>,
    pub maps_played: Option<String>,
    pub url: Option<String>,
    pub id: Option<u32>,
}

/// Date and time text of an upcoming match page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTime {
    pub date: String,
    pub time: String,
}
