//! Run configuration loaded from watchlist.toml
//!
//! Every key is optional. Values of the wrong type fall back to the default with a
//! warning instead of failing the run.

use crate::{Result, WatchlistError};
use chrono_tz::Tz;
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;

pub const DEFAULT_SCOREBOARD_URL: &str =
    "https://site.api.espn.com/apis/site/v2/sports/baseball/college-baseball/scoreboard";
pub const DEFAULT_RANKINGS_URL: &str =
    "https://www.ncaa.com/rankings/baseball/d1/d1baseballcom-top-25";
pub const DEFAULT_TIMEZONE: &str = "America/Denver";
pub const MAX_LOOKAHEAD_DAYS: u32 = 366;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub lookahead_days: u32,
    pub top_n: usize,
    pub both_ranked_bonus: i32,
    pub top10_vs_ranked_bonus: i32,
    pub broadcast_bonus: i32,
    pub favorite_team_bump: i32,
    pub default_favorite_team: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_teams: Option<Vec<String>>,
    /// IANA zone that defines "today" and the day boundaries
    pub timezone: String,
    pub scoreboard_url: String,
    pub rankings_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub output_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            lookahead_days: 7,
            top_n: 3,
            both_ranked_bonus: 12,
            top10_vs_ranked_bonus: 6,
            broadcast_bonus: 2,
            favorite_team_bump: 4,
            default_favorite_team: "Virginia".to_string(),
            favorite_teams: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
            scoreboard_url: DEFAULT_SCOREBOARD_URL.to_string(),
            rankings_url: DEFAULT_RANKINGS_URL.to_string(),
            user_agent: "college-baseball-watchlist/1.0".to_string(),
            timeout_secs: 20,
            output_dir: "site".to_string(),
        }
    }
}

impl Config {
    /// Load from a TOML file. A file that cannot be read or parsed is an error;
    /// individual bad values are not.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            WatchlistError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` if it exists, otherwise use defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            log::debug!(
                "No config at {}, using defaults",
                path.as_ref().display()
            );
            Ok(Config::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = content
            .parse()
            .map_err(|e| WatchlistError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(Self::from_table(&table))
    }

    /// Build a config from an already-parsed table, coercing each known key
    pub fn from_table(table: &toml::Table) -> Self {
        let defaults = Config::default();

        Config {
            lookahead_days: clamp_key(
                "lookahead_days",
                int_key(table, "lookahead_days", defaults.lookahead_days),
                1,
                MAX_LOOKAHEAD_DAYS,
            ),
            top_n: int_key(table, "top_n", defaults.top_n),
            both_ranked_bonus: int_key(table, "both_ranked_bonus", defaults.both_ranked_bonus),
            top10_vs_ranked_bonus: int_key(
                table,
                "top10_vs_ranked_bonus",
                defaults.top10_vs_ranked_bonus,
            ),
            broadcast_bonus: int_key(table, "broadcast_bonus", defaults.broadcast_bonus),
            favorite_team_bump: int_key(table, "favorite_team_bump", defaults.favorite_team_bump),
            default_favorite_team: string_key(
                table,
                "default_favorite_team",
                &defaults.default_favorite_team,
            ),
            favorite_teams: string_list_key(table, "favorite_teams"),
            timezone: string_key(table, "timezone", &defaults.timezone),
            scoreboard_url: string_key(table, "scoreboard_url", &defaults.scoreboard_url),
            rankings_url: string_key(table, "rankings_url", &defaults.rankings_url),
            user_agent: string_key(table, "user_agent", &defaults.user_agent),
            timeout_secs: clamp_key(
                "timeout_secs",
                int_key(table, "timeout_secs", defaults.timeout_secs),
                1,
                u64::MAX,
            ),
            output_dir: string_key(table, "output_dir", &defaults.output_dir),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| WatchlistError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Favorite team names as configured. A `favorite_teams` list wins over the
    /// single default; blank names are dropped.
    pub fn favorite_names(&self) -> Vec<String> {
        let names = match &self.favorite_teams {
            Some(list) => list.clone(),
            None => vec![self.default_favorite_team.clone()],
        };
        names
            .into_iter()
            .filter(|n| !n.trim().is_empty())
            .collect()
    }

    /// The reference time zone, falling back to America/Denver if unknown
    pub fn reference_tz(&self) -> Tz {
        match self.timezone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                log::warn!(
                    "Unknown timezone '{}', using {}",
                    self.timezone,
                    DEFAULT_TIMEZONE
                );
                chrono_tz::America::Denver
            }
        }
    }
}

/// Read an integer key into `T`. Values that are not integers, or do not fit in
/// `T`, fall back to `default` with a warning.
fn int_key<T>(table: &toml::Table, key: &str, default: T) -> T
where
    T: TryFrom<i64> + Display + Copy,
{
    let Some(value) = table.get(key) else {
        return default;
    };

    let coerced = match value {
        toml::Value::Integer(i) => Some(*i),
        toml::Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        toml::Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    };

    let Some(i) = coerced else {
        log::warn!("Config key '{}' is not an integer ({}), using {}", key, value, default);
        return default;
    };

    T::try_from(i).unwrap_or_else(|_| {
        log::warn!("Config key '{}' is out of range ({}), using {}", key, i, default);
        default
    })
}

/// Pull `value` into `min..=max`, warning when it had to move
fn clamp_key<T: PartialOrd + Display + Copy>(key: &str, value: T, min: T, max: T) -> T {
    let clamped = if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    };

    if clamped != value {
        log::warn!(
            "Config key '{}' = {} is outside {}..={}, using {}",
            key,
            value,
            min,
            max,
            clamped
        );
    }
    clamped
}

fn string_key(table: &toml::Table, key: &str, default: &str) -> String {
    match table.get(key) {
        Some(toml::Value::String(s)) => s.clone(),
        Some(other) => {
            log::warn!("Config key '{}' is not a string ({}), using '{}'", key, other, default);
            default.to_string()
        }
        None => default.to_string(),
    }
}

fn string_list_key(table: &toml::Table, key: &str) -> Option<Vec<String>> {
    match table.get(key)? {
        toml::Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        ),
        // A bare string is treated as a one-element list
        toml::Value::String(s) => Some(vec![s.clone()]),
        other => {
            log::warn!("Config key '{}' is not a list of names ({}), ignoring", key, other);
            None
        }
    }
}
