//! Team name normalization
//!
//! ESPN and the poll spell schools differently ("UVA", "Virginia Cavaliers",
//! "Ole Miss"). Every cross-source comparison goes through [`normalize`] so the
//! rankings lookup and favorite matching can never disagree.

/// Characters dropped before comparison
const STRIPPED: [char; 6] = ['.', ',', '\'', '"', '(', ')'];

/// Alias key (already normalized) -> canonical normalized name.
///
/// No target may itself appear as a key, otherwise normalization would not be
/// idempotent.
pub const TEAM_ALIASES: &[(&str, &str)] = &[
    ("uva", "virginia"),
    ("virginia cavaliers", "virginia"),
    ("miami fl", "miami"),
    ("miami florida", "miami"),
    ("miami hurricanes", "miami"),
    ("ole miss", "mississippi"),
    ("ole miss rebels", "mississippi"),
    ("unc", "north carolina"),
    ("louisiana state", "lsu"),
    ("north carolina state", "nc state"),
    ("southern california", "usc"),
    ("texas am", "texas a&m"),
];

/// Canonical form of a team name. Total over all strings, including empty.
pub fn normalize(name: &str) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED.contains(c))
        .collect();
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    match TEAM_ALIASES.iter().find(|(alias, _)| *alias == collapsed) {
        Some((_, canonical)) => (*canonical).to_string(),
        None => collapsed,
    }
}

/// Whether two names refer to the same school
pub fn team_matches(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// A set of favorite teams, stored normalized
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteTeams {
    names: Vec<String>,
}

impl FavoriteTeams {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = names
            .into_iter()
            .map(|n| normalize(n.as_ref()))
            .filter(|n| !n.is_empty())
            .collect();
        normalized.sort();
        normalized.dedup();
        FavoriteTeams { names: normalized }
    }

    pub fn contains(&self, team: &str) -> bool {
        let team = normalize(team);
        self.names.iter().any(|n| *n == team)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Normalized names, sorted
    pub fn names(&self) -> &[String] {
        &self.names
    }
}
