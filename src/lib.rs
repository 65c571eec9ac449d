//! College baseball watchlist
//!
//! Cross-references the ESPN scoreboard with the weekly Top-25 poll, scores every
//! ranked game by how worth watching it is, and keeps the best few per day over a
//! short lookahead window.

pub mod aggregate;
pub mod config;
pub mod data;
pub mod normalize;
pub mod pipeline;
pub mod rankings;
pub mod report;
pub mod scoring;

pub use config::Config;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Source of schedule or poll data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    EspnScoreboard,
    NcaaRankings,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::EspnScoreboard => write!(f, "ESPN scoreboard"),
            DataSource::NcaaRankings => write!(f, "NCAA rankings"),
        }
    }
}

/// A single scheduled game as reported by the schedule source.
///
/// Ranks are never carried here; they are resolved against the rankings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    pub away: String,
    pub home: String,
    pub start_utc: DateTime<Utc>,
    /// Broadcast networks, empty when the source has none listed
    pub broadcast: String,
}

impl GameRecord {
    /// Both team names present after trimming
    pub fn is_complete(&self) -> bool {
        !self.away.trim().is_empty() && !self.home.trim().is_empty()
    }

    /// A whitespace-only broadcast counts as none
    pub fn has_broadcast(&self) -> bool {
        !self.broadcast.trim().is_empty()
    }
}

/// Which rationale branch a scored game fell into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchupKind {
    /// Both teams ranked 10 or better
    Top10Showdown,
    /// Both teams ranked, at least one outside the top 10
    Top25Matchup,
    /// Exactly one team ranked
    RankedTeamWatch,
}

impl MatchupKind {
    /// Stable identifier matching the serialized form
    pub fn slug(&self) -> &'static str {
        match self {
            MatchupKind::Top10Showdown => "top10_showdown",
            MatchupKind::Top25Matchup => "top25_matchup",
            MatchupKind::RankedTeamWatch => "ranked_team_watch",
        }
    }
}

impl fmt::Display for MatchupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchupKind::Top10Showdown => write!(f, "Top-10 showdown"),
            MatchupKind::Top25Matchup => write!(f, "Top-25 matchup"),
            MatchupKind::RankedTeamWatch => write!(f, "Ranked team watch"),
        }
    }
}

/// A game that passed the eligibility gate, with its score and rationale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredGame {
    pub id: String,
    pub away: String,
    pub home: String,
    pub away_rank: Option<u8>,
    pub home_rank: Option<u8>,
    pub start_utc: DateTime<Utc>,
    pub broadcast: String,
    /// Final score, including the favorite bump when the server-side favorites match
    pub score: i32,
    /// Score without any favorite bump, so a page can re-apply it for another team
    pub base_score: i32,
    /// Normalized names, matched against `TeamOption::key`
    pub away_key: String,
    pub home_key: String,
    pub kind: MatchupKind,
    pub reason: String,
}

impl ScoredGame {
    /// "#5 Virginia @ #18 Duke"
    pub fn matchup(&self) -> String {
        format!(
            "{} @ {}",
            team_label(&self.away, self.away_rank),
            team_label(&self.home, self.home_rank)
        )
    }
}

fn team_label(name: &str, rank: Option<u8>) -> String {
    match rank {
        Some(r) => format!("#{} {}", r, name),
        None => name.to_string(),
    }
}

/// A team offered in the report's favorite selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamOption {
    /// Normalized name
    pub key: String,
    /// Name as the source printed it
    pub name: String,
    pub rank: Option<u8>,
}

impl TeamOption {
    /// "#3 Ole Miss", or just the name when unranked
    pub fn label(&self) -> String {
        team_label(&self.name, self.rank)
    }
}

/// Everything one run hands to the report writer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    #[serde(rename = "generated_at_utc")]
    pub generated_at: DateTime<Utc>,
    /// Reference time zone the day keys are expressed in
    pub timezone: String,
    /// Bump a browser-selected favorite adds to `base_score`
    pub favorite_team_bump: i32,
    /// Normalized favorites the `score` fields were computed with
    pub favorites: Vec<String>,
    /// Selector choices: ranked teams by rank, then other teams on the slate
    pub teams: Vec<TeamOption>,
    /// One entry per lookahead date, each holding at most `top_n` games
    pub days: BTreeMap<NaiveDate, Vec<ScoredGame>>,
}

impl RunOutput {
    pub fn total_games(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("Source failed for {data_source}: {message}")]
    Source {
        data_source: DataSource,
        message: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, WatchlistError>;
