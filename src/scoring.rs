//! Eligibility and watchability scoring
//!
//! A game is eligible when at least one side holds a poll rank. Eligible games get
//! an integer score built from rank points plus a handful of configured bonuses,
//! and a short rationale describing why the game is worth a look.

use crate::normalize::{normalize, FavoriteTeams};
use crate::rankings::RankingsTable;
use crate::{Config, GameRecord, MatchupKind, ScoredGame};

/// Ranks at or above this count as top-10
pub const TOP10_CUTOFF: u8 = 10;

/// Scoring weights for one run
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub both_ranked_bonus: i32,
    pub top10_vs_ranked_bonus: i32,
    pub broadcast_bonus: i32,
    pub favorite_team_bump: i32,
    pub favorites: FavoriteTeams,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig::from_config(&Config::default())
    }
}

impl ScoringConfig {
    pub fn from_config(config: &Config) -> Self {
        ScoringConfig {
            both_ranked_bonus: config.both_ranked_bonus,
            top10_vs_ranked_bonus: config.top10_vs_ranked_bonus,
            broadcast_bonus: config.broadcast_bonus,
            favorite_team_bump: config.favorite_team_bump,
            favorites: FavoriteTeams::new(config.favorite_names()),
        }
    }
}

/// Points for a single rank: #1 is worth 25, #25 is worth 1, unranked 0
pub fn rank_points(rank: Option<u8>) -> i32 {
    match rank {
        Some(r) if (1..=25).contains(&r) => 26 - r as i32,
        _ => 0,
    }
}

/// Score without the favorite bump. Sums saturate instead of overflowing.
pub fn base_score(
    game: &GameRecord,
    away_rank: Option<u8>,
    home_rank: Option<u8>,
    config: &ScoringConfig,
) -> i32 {
    let mut score = rank_points(away_rank) + rank_points(home_rank);

    if let (Some(away), Some(home)) = (away_rank, home_rank) {
        score = score.saturating_add(config.both_ranked_bonus);

        // Only reachable with both sides ranked, so this reads as "a top-10 team
        // is in a ranked-vs-ranked game".
        if away <= TOP10_CUTOFF || home <= TOP10_CUTOFF {
            score = score.saturating_add(config.top10_vs_ranked_bonus);
        }
    }

    if game.has_broadcast() {
        score = score.saturating_add(config.broadcast_bonus);
    }

    score
}

/// The configured bump when either side is a favorite, otherwise 0
pub fn favorite_bump(game: &GameRecord, config: &ScoringConfig) -> i32 {
    if config.favorites.contains(&game.away) || config.favorites.contains(&game.home) {
        config.favorite_team_bump
    } else {
        0
    }
}

/// Score a game from already-resolved ranks
pub fn score_game(
    game: &GameRecord,
    away_rank: Option<u8>,
    home_rank: Option<u8>,
    config: &ScoringConfig,
) -> i32 {
    base_score(game, away_rank, home_rank, config).saturating_add(favorite_bump(game, config))
}

/// Rationale branch for an eligible game. `None` when neither team is ranked.
pub fn matchup_kind(away_rank: Option<u8>, home_rank: Option<u8>) -> Option<MatchupKind> {
    match (away_rank, home_rank) {
        (Some(a), Some(h)) if a <= TOP10_CUTOFF && h <= TOP10_CUTOFF => {
            Some(MatchupKind::Top10Showdown)
        }
        (Some(_), Some(_)) => Some(MatchupKind::Top25Matchup),
        (Some(_), None) | (None, Some(_)) => Some(MatchupKind::RankedTeamWatch),
        (None, None) => None,
    }
}

/// Human-readable rationale for a scored game
pub fn build_reason(game: &GameRecord, kind: MatchupKind, away_rank: Option<u8>) -> String {
    let mut reason = match kind {
        MatchupKind::Top10Showdown => {
            "Top-10 showdown: this is the headline game on the slate.".to_string()
        }
        MatchupKind::Top25Matchup => {
            "Top-25 matchup: two ranked teams, strong chance this stays meaningful late."
                .to_string()
        }
        MatchupKind::RankedTeamWatch => {
            let ranked_team = if away_rank.is_some() {
                &game.away
            } else {
                &game.home
            };
            format!(
                "Ranked team watch: {} is ranked, and this one has upset potential.",
                ranked_team
            )
        }
    };

    if game.has_broadcast() {
        reason.push_str(&format!(" Available on: {}.", game.broadcast.trim()));
    }

    reason
}

/// Resolve ranks, apply the eligibility gate and score the game.
///
/// Returns `None` for games with no ranked team.
pub fn evaluate(
    game: &GameRecord,
    rankings: &RankingsTable,
    config: &ScoringConfig,
) -> Option<ScoredGame> {
    let away_rank = rankings.rank_of(&game.away);
    let home_rank = rankings.rank_of(&game.home);
    let kind = matchup_kind(away_rank, home_rank)?;
    let base = base_score(game, away_rank, home_rank, config);

    Some(ScoredGame {
        id: game.id.clone(),
        away: game.away.clone(),
        home: game.home.clone(),
        away_rank,
        home_rank,
        start_utc: game.start_utc,
        broadcast: game.broadcast.clone(),
        score: base.saturating_add(favorite_bump(game, config)),
        base_score: base,
        away_key: normalize(&game.away),
        home_key: normalize(&game.home),
        kind,
        reason: build_reason(game, kind, away_rank),
    })
}
