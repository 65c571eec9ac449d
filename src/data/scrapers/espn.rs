//! ESPN college baseball scoreboard
//!
//! Queries the public scoreboard API one date at a time (`dates=YYYYMMDD`) and
//! turns each event into a [`GameRecord`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use super::{http_client, ScheduleSource};
use crate::{Config, DataSource, GameRecord, Result, WatchlistError};

#[derive(Debug, Deserialize)]
struct ScoreboardResponse {
    #[serde(default)]
    events: Vec<EspnEvent>,
}

#[derive(Debug, Deserialize)]
struct EspnEvent {
    #[serde(default)]
    id: String,
    date: Option<String>,
    #[serde(default)]
    competitions: Vec<EspnCompetition>,
}

#[derive(Debug, Deserialize)]
struct EspnCompetition {
    date: Option<String>,
    #[serde(default)]
    competitors: Vec<EspnCompetitor>,
    #[serde(default)]
    broadcasts: Vec<EspnBroadcast>,
}

#[derive(Debug, Deserialize)]
struct EspnCompetitor {
    #[serde(rename = "homeAway", default)]
    home_away: String,
    team: Option<EspnTeam>,
}

#[derive(Debug, Deserialize)]
struct EspnTeam {
    #[serde(rename = "shortDisplayName")]
    short_display_name: Option<String>,
    #[serde(rename = "displayName")]
    display_name: Option<String>,
}

impl EspnTeam {
    /// Short school name ("Virginia"), falling back to the full display name
    fn name(&self) -> Option<&str> {
        [&self.short_display_name, &self.display_name]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct EspnBroadcast {
    #[serde(default)]
    names: Vec<String>,
}

/// Scraper for the ESPN scoreboard API
pub struct ScoreboardScraper {
    client: reqwest::blocking::Client,
    url: String,
}

impl ScoreboardScraper {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(ScoreboardScraper {
            client: http_client(config)?,
            url: config.scoreboard_url.clone(),
        })
    }

    /// Parse a scoreboard payload, skipping events that lack two named teams or
    /// a start time
    pub fn parse_scoreboard(json: &str) -> Result<Vec<GameRecord>> {
        let response: ScoreboardResponse = serde_json::from_str(json)?;
        let total = response.events.len();

        let games: Vec<GameRecord> = response
            .events
            .iter()
            .filter_map(|event| {
                let game = parse_event(event);
                if game.is_none() {
                    log::debug!("Skipping incomplete scoreboard event '{}'", event.id);
                }
                game
            })
            .collect();

        log::debug!("Parsed {} of {} scoreboard events", games.len(), total);
        Ok(games)
    }
}

impl ScheduleSource for ScoreboardScraper {
    fn source(&self) -> DataSource {
        DataSource::EspnScoreboard
    }

    fn fetch_day(&self, date: NaiveDate) -> Result<Vec<GameRecord>> {
        let day = date.format("%Y%m%d").to_string();
        log::info!("Fetching scoreboard for {}", date);

        let response = self
            .client
            .get(&self.url)
            .query(&[("dates", day.as_str())])
            .send()?;

        if !response.status().is_success() {
            return Err(WatchlistError::Source {
                data_source: DataSource::EspnScoreboard,
                message: format!("HTTP {} for {}", response.status(), date),
            });
        }

        let body = response.text()?;
        Self::parse_scoreboard(&body)
    }
}

fn parse_event(event: &EspnEvent) -> Option<GameRecord> {
    let comp = event.competitions.first()?;
    if comp.competitors.len() < 2 {
        return None;
    }

    let side = |which: &str| {
        comp.competitors
            .iter()
            .filter(|c| c.home_away == which)
            .find_map(|c| c.team.as_ref().and_then(EspnTeam::name))
    };
    let home = side("home")?;
    let away = side("away")?;

    let start = comp.date.as_deref().or(event.date.as_deref())?;
    let start_utc = parse_espn_date(start)?;

    let broadcast = comp
        .broadcasts
        .iter()
        .flat_map(|b| b.names.iter())
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    Some(GameRecord {
        id: event.id.clone(),
        away: away.to_string(),
        home: home.to_string(),
        start_utc,
        broadcast,
    })
}

/// ESPN dates come as "2026-03-06T23:00Z" (no seconds) or full RFC 3339
pub fn parse_espn_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|naive| naive.and_utc())
}
