//! Day bucketing and per-day top-N selection

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Days, NaiveDate, TimeZone};

use crate::rankings::RankingsTable;
use crate::scoring::{evaluate, ScoringConfig};
use crate::{GameRecord, ScoredGame};

/// The lookahead window: how many days and how many games per day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub lookahead_days: u32,
    pub top_n: usize,
}

impl Default for Window {
    fn default() -> Self {
        Window {
            lookahead_days: 7,
            top_n: 3,
        }
    }
}

impl Window {
    pub fn from_config(config: &crate::Config) -> Self {
        Window {
            lookahead_days: config.lookahead_days,
            top_n: config.top_n,
        }
    }

    /// `lookahead_days` consecutive dates starting at `today`
    pub fn dates(&self, today: NaiveDate) -> Vec<NaiveDate> {
        (0..self.lookahead_days as u64)
            .filter_map(|offset| today.checked_add_days(Days::new(offset)))
            .collect()
    }
}

/// Calendar date of `now` in the reference zone
pub fn today_in<Tz: TimeZone>(now: DateTime<Tz>, zone: &impl TimeZone) -> NaiveDate {
    now.with_timezone(zone).date_naive()
}

/// Score, filter, sort and truncate one day's games.
///
/// Incomplete records and games without a ranked team are dropped. The sort is
/// stable so equal scores keep their source order.
pub fn rank_day(
    games: &[GameRecord],
    rankings: &RankingsTable,
    scoring: &ScoringConfig,
    top_n: usize,
) -> Vec<ScoredGame> {
    let mut scored: Vec<ScoredGame> = games
        .iter()
        .filter(|g| g.is_complete())
        .filter_map(|g| evaluate(g, rankings, scoring))
        .collect();

    // Vec::sort_by is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(top_n);
    scored
}

/// Build the per-day output for the whole window.
///
/// Every date in the window gets a key, empty when nothing qualified. Dates in
/// `events_by_day` outside the window are ignored; the day each game was filed
/// under by the schedule source is trusted as-is.
pub fn aggregate(
    today: NaiveDate,
    events_by_day: &HashMap<NaiveDate, Vec<GameRecord>>,
    rankings: &RankingsTable,
    scoring: &ScoringConfig,
    window: Window,
) -> BTreeMap<NaiveDate, Vec<ScoredGame>> {
    let mut days = BTreeMap::new();

    for date in window.dates(today) {
        let games = events_by_day
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let top = rank_day(games, rankings, scoring, window.top_n);
        log::debug!(
            "{}: {} games, {} kept",
            date,
            games.len(),
            top.len()
        );
        days.insert(date, top);
    }

    days
}
