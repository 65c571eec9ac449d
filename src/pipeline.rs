//! One watchlist run
//!
//! Fetch the poll, fetch each day in the window, then score and bucket. Any source
//! failure aborts the run: scoring against a missing poll would silently treat
//! every team as unranked.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{NaiveDate, SubsecRound, Utc};

use crate::aggregate::{aggregate, today_in, Window};
use crate::data::{RankingsSource, ScheduleSource};
use crate::rankings::RankingsTable;
use crate::scoring::ScoringConfig;
use crate::{Config, Result, RunOutput, ScoredGame, TeamOption, WatchlistError};

/// Fetch the poll and build the rankings table, failing if the source produced
/// nothing usable
pub fn load_rankings<R: RankingsSource>(source: &R) -> Result<RankingsTable> {
    let entries = source.fetch_rankings()?;
    let table = RankingsTable::from_entries(entries);

    if table.is_empty() {
        return Err(WatchlistError::Source {
            data_source: source.source(),
            message: "no ranked teams found".to_string(),
        });
    }

    log::info!("Loaded {} ranked teams", table.len());
    Ok(table)
}

/// Favorite selector choices: every ranked team in poll order, then unranked
/// teams from the selected games by name
pub fn team_options(
    rankings: &RankingsTable,
    days: &BTreeMap<NaiveDate, Vec<ScoredGame>>,
) -> Vec<TeamOption> {
    let mut options: Vec<TeamOption> = rankings
        .sorted_with_keys()
        .into_iter()
        .map(|(rank, key, name)| TeamOption {
            key: key.to_string(),
            name: name.to_string(),
            rank: Some(rank),
        })
        .collect();

    let mut seen: HashSet<String> = options.iter().map(|t| t.key.clone()).collect();
    let mut unranked = Vec::new();
    for game in days.values().flatten() {
        for (key, name) in [(&game.away_key, &game.away), (&game.home_key, &game.home)] {
            if seen.insert(key.clone()) {
                unranked.push(TeamOption {
                    key: key.clone(),
                    name: name.clone(),
                    rank: None,
                });
            }
        }
    }
    unranked.sort_by(|a, b| a.name.cmp(&b.name));

    options.extend(unranked);
    options
}

pub struct Pipeline<S, R> {
    schedule: S,
    rankings: R,
    scoring: ScoringConfig,
    window: Window,
    timezone: chrono_tz::Tz,
}

impl<S: ScheduleSource, R: RankingsSource> Pipeline<S, R> {
    pub fn new(schedule: S, rankings: R, config: &Config) -> Self {
        Pipeline {
            schedule,
            rankings,
            scoring: ScoringConfig::from_config(config),
            window: Window::from_config(config),
            timezone: config.reference_tz(),
        }
    }

    /// Today's date in the reference time zone
    pub fn today(&self) -> NaiveDate {
        today_in(Utc::now(), &self.timezone)
    }

    pub fn load_rankings(&self) -> Result<RankingsTable> {
        load_rankings(&self.rankings)
    }

    /// Run the whole window starting at `today`
    pub fn run(&self, today: NaiveDate) -> Result<RunOutput> {
        let rankings = self.load_rankings()?;

        let mut events_by_day = HashMap::new();
        for date in self.window.dates(today) {
            let games = self.schedule.fetch_day(date)?;
            log::info!("{}: {} games on the schedule", date, games.len());
            events_by_day.insert(date, games);
        }

        let days = aggregate(today, &events_by_day, &rankings, &self.scoring, self.window);

        let output = RunOutput {
            generated_at: Utc::now().trunc_subsecs(0),
            timezone: self.timezone.name().to_string(),
            favorite_team_bump: self.scoring.favorite_team_bump,
            favorites: self.scoring.favorites.names().to_vec(),
            teams: team_options(&rankings, &days),
            days,
        };
        log::info!(
            "Selected {} games across {} days",
            output.total_games(),
            output.days.len()
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataSource, GameRecord, MatchupKind};
    use chrono::TimeZone;
    use std::cell::RefCell;

    struct MockSchedule {
        games: HashMap<NaiveDate, Vec<GameRecord>>,
        fail_on: Option<NaiveDate>,
        requested: RefCell<Vec<NaiveDate>>,
    }

    impl ScheduleSource for MockSchedule {
        fn source(&self) -> DataSource {
            DataSource::EspnScoreboard
        }

        fn fetch_day(&self, date: NaiveDate) -> Result<Vec<GameRecord>> {
            self.requested.borrow_mut().push(date);
            if self.fail_on == Some(date) {
                return Err(WatchlistError::Source {
                    data_source: DataSource::EspnScoreboard,
                    message: "HTTP 503".to_string(),
                });
            }
            Ok(self.games.get(&date).cloned().unwrap_or_default())
        }
    }

    struct MockRankings(Option<Vec<(i64, String)>>);

    impl RankingsSource for MockRankings {
        fn source(&self) -> DataSource {
            DataSource::NcaaRankings
        }

        fn fetch_rankings(&self) -> Result<Vec<(i64, String)>> {
            self.0.clone().ok_or_else(|| WatchlistError::Source {
                data_source: DataSource::NcaaRankings,
                message: "connection refused".to_string(),
            })
        }
    }

    fn make_game(id: &str, away: &str, home: &str, broadcast: &str) -> GameRecord {
        GameRecord {
            id: id.to_string(),
            away: away.to_string(),
            home: home.to_string(),
            start_utc: Utc.with_ymd_and_hms(2026, 3, 6, 23, 0, 0).unwrap(),
            broadcast: broadcast.to_string(),
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn poll() -> MockRankings {
        MockRankings(Some(vec![
            (1, "LSU".to_string()),
            (5, "Virginia".to_string()),
            (18, "Duke".to_string()),
        ]))
    }

    fn schedule(fail_on: Option<NaiveDate>) -> MockSchedule {
        let mut games = HashMap::new();
        games.insert(
            date(6),
            vec![
                make_game("c", "Rice", "Houston", ""),
                make_game("b", "LSU", "Unranked State", ""),
                make_game("a", "Virginia", "Duke", "ESPN2"),
            ],
        );
        MockSchedule {
            games,
            fail_on,
            requested: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn test_full_run() {
        let config = Config::default();
        let pipeline = Pipeline::new(schedule(None), poll(), &config);

        let output = pipeline.run(date(5)).unwrap();

        assert_eq!(output.days.len(), 7);
        assert_eq!(output.timezone, "America/Denver");
        assert_eq!(output.generated_at.timestamp_subsec_nanos(), 0);
        assert_eq!(
            *pipeline.schedule.requested.borrow(),
            (5..=11).map(date).collect::<Vec<_>>()
        );

        let friday = &output.days[&date(6)];
        assert_eq!(friday.len(), 2);
        assert_eq!(friday[0].id, "a");
        assert_eq!(friday[0].score, 53);
        assert_eq!(friday[0].kind, MatchupKind::Top25Matchup);
        assert_eq!(friday[1].id, "b");
        assert_eq!(friday[1].score, 25);
        assert!(output.days[&date(5)].is_empty());

        assert_eq!(output.favorite_team_bump, 4);
        assert_eq!(output.favorites, vec!["virginia".to_string()]);
        let labels: Vec<String> = output.teams.iter().map(TeamOption::label).collect();
        assert_eq!(labels, vec!["#1 LSU", "#5 Virginia", "#18 Duke", "Unranked State"]);
        assert_eq!(output.teams[3].key, "unranked state");
    }

    #[test]
    fn test_load_rankings_keeps_school_names() {
        let table = load_rankings(&MockRankings(Some(vec![
            (2, "Ole Miss".to_string()),
            (1, "LSU".to_string()),
        ])))
        .unwrap();
        assert_eq!(table.sorted(), vec![(1, "LSU"), (2, "Ole Miss")]);

        assert!(load_rankings(&MockRankings(Some(vec![(30, "Nobody".to_string())]))).is_err());
    }

    #[test]
    fn test_rankings_failure_is_fatal() {
        let pipeline = Pipeline::new(schedule(None), MockRankings(None), &Config::default());
        assert!(pipeline.run(date(5)).is_err());
        assert!(pipeline.schedule.requested.borrow().is_empty());
    }

    #[test]
    fn test_empty_rankings_is_fatal() {
        let pipeline = Pipeline::new(schedule(None), MockRankings(Some(vec![])), &Config::default());
        let err = pipeline.run(date(5)).unwrap_err();
        assert!(matches!(err, WatchlistError::Source { .. }));
    }

    #[test]
    fn test_schedule_failure_is_fatal() {
        let pipeline = Pipeline::new(schedule(Some(date(7))), poll(), &Config::default());
        assert!(pipeline.run(date(5)).is_err());
    }

    #[test]
    fn test_window_from_config() {
        let mut config = Config::default();
        config.lookahead_days = 2;
        config.top_n = 1;
        let pipeline = Pipeline::new(schedule(None), poll(), &config);

        let output = pipeline.run(date(6)).unwrap();
        assert_eq!(output.days.len(), 2);
        assert_eq!(output.days[&date(6)].len(), 1);
        assert_eq!(output.days[&date(6)][0].id, "a");
    }
}
