// Team selection for leaderboards.

use std::fmt;

/// Sentinel accepted (in any casing) for "every team".
pub const ALL_TEAMS: &str = "all";

/// Selector entries shown to users: (value, label).
pub const TEAMS: [(&str, &str); 11] = [
    (ALL_TEAMS, "전체"),
    ("KIA", "KIA"),
    ("롯데", "롯데"),
    ("삼성", "삼성"),
    ("SSG", "SSG"),
    ("두산", "두산"),
    ("LG", "LG"),
    ("NC", "NC"),
    ("KT", "KT"),
    ("한화", "한화"),
    ("키움", "키움"),
];

/// Which team a leaderboard is restricted to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TeamFilter {
    #[default]
    All,
    /// Exact, case-sensitive team name as stored on documents.
    Team(String),
}

impl TeamFilter {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case(ALL_TEAMS) {
            TeamFilter::All
        } else {
            TeamFilter::Team(raw.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, TeamFilter::All)
    }

    pub fn team(&self) -> Option<&str> {
        match self {
            TeamFilter::All => None,
            TeamFilter::Team(name) => Some(name),
        }
    }
}

impl fmt::Display for TeamFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamFilter::All => f.write_str(ALL_TEAMS),
            TeamFilter::Team(name) => f.write_str(name),
        }
    }
}
