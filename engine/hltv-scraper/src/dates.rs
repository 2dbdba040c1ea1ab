//! Site date text to local calendar dates
//!
//! HLTV renders dates in the zone carried by its timezone cookie
//! (Europe/Copenhagen by default). Dates are taken as midnight in that zone
//! and shifted into the local zone, so a viewer west of Copenhagen sees the
//! previous calendar day.

use crate::config::ScraperConfig;
use crate::error::ConfigError;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use tracing::debug;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Target zone for normalized dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalZone {
    /// Whatever the host reports
    Host,
    Named(Tz),
}

/// Converts site-local date text into local dates
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    source: Tz,
    local: LocalZone,
}

impl DateNormalizer {
    pub fn new(source: Tz, local: LocalZone) -> Self {
        Self { source, local }
    }

    pub fn from_config(config: &ScraperConfig) -> Result<Self, ConfigError> {
        let local = match config.local_tz()? {
            Some(tz) => LocalZone::Named(tz),
            None => LocalZone::Host,
        };
        Ok(Self::new(config.source_tz()?, local))
    }

    pub fn source(&self) -> Tz {
        self.source
    }

    pub fn local(&self) -> LocalZone {
        self.local
    }

    /// `"Results for May 3rd 2024"` → `"2024-05-03"` in the local zone
    pub fn normalize_results_heading(&self, text: &str) -> Option<String> {
        let text = text.trim();
        let text = text.strip_prefix("Results for").unwrap_or(text);

        let mut parts = text.split_whitespace();
        let month = month_name_to_number(parts.next()?)?;
        let day = parse_day(parts.next()?)?;
        let year: i32 = parts.next()?.parse().ok()?;

        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let local = self.localize(date)?;
        Some(local.format("%Y-%m-%d").to_string())
    }

    /// `"3rd of May 2024"` → the local calendar date
    pub fn normalize_match_date(&self, text: &str) -> Option<NaiveDate> {
        let mut parts = text.split_whitespace().filter(|p| *p != "of");
        let day = parse_day(parts.next()?)?;
        let month = month_name_to_number(parts.next()?)?;
        let year: i32 = parts.next()?.parse().ok()?;

        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        self.localize(date)
    }

    /// Date used when a results block has no heading, formatted `D/M/YYYY`
    pub fn today_fallback(&self) -> String {
        let today = self.now_local().date();
        format!("{}/{}/{}", today.day(), today.month(), today.year())
    }

    /// Current local wall-clock time truncated to the minute
    pub fn now_local(&self) -> NaiveDateTime {
        let now = self.to_local(Utc::now());
        now.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(now)
    }

    /// Time left until a match starts, if it has not started yet
    ///
    /// The date is shifted into the local zone but `time_text` is used as
    /// the page prints it.
    pub fn countdown(&self, date_text: &str, time_text: &str, now: NaiveDateTime) -> Option<Duration> {
        let date = self.normalize_match_date(date_text)?;
        let time = NaiveTime::parse_from_str(time_text.trim(), "%H:%M").ok()?;
        let deadline = date.and_time(time);
        debug!("Generating countdown from {} to {}", now, deadline);

        (now < deadline).then(|| deadline - now)
    }

    /// Midnight in the source zone, expressed as a local calendar date
    fn localize(&self, date: NaiveDate) -> Option<NaiveDate> {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        let at_source = self.source.from_local_datetime(&midnight).earliest()?;
        Some(self.to_local(at_source).date())
    }

    fn to_local<Z: TimeZone>(&self, instant: DateTime<Z>) -> NaiveDateTime {
        match self.local {
            LocalZone::Host => instant.with_timezone(&Local).naive_local(),
            LocalZone::Named(tz) => instant.with_timezone(&tz).naive_local(),
        }
    }
}

/// Month name to 1-based number, accepting the site's `"Augu"` typo
pub fn month_name_to_number(name: &str) -> Option<u32> {
    let lower = name.trim().to_lowercase();
    let lower = if lower == "augu" { "august".to_string() } else { lower };
    MONTHS.iter().position(|m| *m == lower).map(|i| i as u32 + 1)
}

fn parse_day(token: &str) -> Option<u32> {
    let digits = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| token.strip_suffix(suffix))
        .unwrap_or(token);
    digits.parse().ok()
}

/// Render a duration as `H:MM:SS`, with a `N day(s), ` prefix
pub fn format_countdown(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    let days = total / 86_400;
    let rest = total % 86_400;
    let clock = format!("{}:{:02}:{:02}", rest / 3600, (rest % 3600) / 60, rest % 60);

    match days {
        0 => clock,
        1 => format!("1 day, {clock}"),
        n => format!("{n} days, {clock}"),
    }
}
