//! Poll rankings keyed by normalized team name

use std::collections::HashMap;

use crate::normalize::normalize;

pub const MIN_RANK: i64 = 1;
pub const MAX_RANK: i64 = 25;

/// Normalized team name -> poll rank (1..=25) and the name as printed
#[derive(Debug, Clone, Default)]
pub struct RankingsTable {
    ranks: HashMap<String, (u8, String)>,
}

impl RankingsTable {
    /// Build from (rank, school) pairs. Out-of-range ranks and blank names are
    /// skipped; a repeated school keeps the last rank seen.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: AsRef<str>,
    {
        let mut ranks = HashMap::new();

        for (rank, school) in entries {
            let key = normalize(school.as_ref());
            if key.is_empty() || !(MIN_RANK..=MAX_RANK).contains(&rank) {
                log::debug!("Skipping rankings entry {} '{}'", rank, school.as_ref());
                continue;
            }
            ranks.insert(key, (rank as u8, school.as_ref().trim().to_string()));
        }

        RankingsTable { ranks }
    }

    /// Rank of a team, `None` meaning unranked
    pub fn rank_of(&self, team: &str) -> Option<u8> {
        self.ranks.get(&normalize(team)).map(|(rank, _)| *rank)
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// (rank, school as printed) ordered by rank, best first
    pub fn sorted(&self) -> Vec<(u8, &str)> {
        self.sorted_with_keys()
            .into_iter()
            .map(|(rank, _, name)| (rank, name))
            .collect()
    }

    /// (rank, normalized key, school as printed) ordered by rank
    pub fn sorted_with_keys(&self) -> Vec<(u8, &str, &str)> {
        let mut entries: Vec<_> = self
            .ranks
            .iter()
            .map(|(key, (rank, name))| (*rank, key.as_str(), name.as_str()))
            .collect();
        entries.sort();
        entries
    }
}
