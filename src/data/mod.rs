//! Data ingestion
//!
//! Schedule and rankings sources. Nothing fetched here is persisted between runs.

pub mod scrapers;

pub use scrapers::espn::ScoreboardScraper;
pub use scrapers::ncaa::RankingsScraper;
pub use scrapers::{RankingsSource, ScheduleSource};
