//! Scrapers for the scoreboard feed and the Top-25 poll

pub mod espn;
pub mod ncaa;

use chrono::NaiveDate;
use std::time::Duration;

use crate::{Config, DataSource, GameRecord, Result};

/// Anything that can list the games scheduled on a date
pub trait ScheduleSource {
    /// The data source this scraper fetches from
    fn source(&self) -> DataSource;

    /// Games the source files under `date`. Malformed events are skipped, but a
    /// failed request is an error.
    fn fetch_day(&self, date: NaiveDate) -> Result<Vec<GameRecord>>;
}

/// Anything that can produce the current poll as (rank, school) pairs
pub trait RankingsSource {
    fn source(&self) -> DataSource;

    fn fetch_rankings(&self) -> Result<Vec<(i64, String)>>;
}

/// Blocking HTTP client shared by both scrapers
pub fn http_client(config: &Config) -> Result<reqwest::blocking::Client> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}
