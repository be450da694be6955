// Document store seam: the query and write shapes both components agree on.
//
// The ranking service only ever sees a `StatStore`; the SQLite adapter in
// `db.rs` is one implementation, test fakes are another.

use crate::metric::{Metric, SortDirection};
use crate::stat::PitcherSeasonStat;
use std::cmp::Ordering;
use thiserror::Error;

/// Fixed leaderboard window.
pub const TOP_N: usize = 20;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid collection name `{0}`")]
    InvalidCollection(String),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// A single conjunctive filter predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Exact match on `season`.
    Season(i32),
    /// Exact, case-sensitive match on `team`.
    Team(String),
    /// Inclusive lower bound on a metric. Documents without the metric fail.
    AtLeast { metric: Metric, min: f64 },
}

impl Filter {
    pub fn matches(&self, doc: &PitcherSeasonStat) -> bool {
        match self {
            Filter::Season(season) => doc.season == *season,
            Filter::Team(team) => doc.team == *team,
            Filter::AtLeast { metric, min } => doc
                .get(*metric)
                .is_some_and(|v| v.as_f64() >= *min),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub metric: Metric,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatQuery {
    pub collection: String,
    pub filters: Vec<Filter>,
    pub sort: SortSpec,
    pub size: usize,
}

impl StatQuery {
    /// True when `doc` satisfies every filter.
    pub fn matches(&self, doc: &PitcherSeasonStat) -> bool {
        self.filters.iter().all(|f| f.matches(doc))
    }

    /// Ordering of two documents under this query's sort. Documents missing
    /// the sort field go last in either direction.
    pub fn compare(&self, a: &PitcherSeasonStat, b: &PitcherSeasonStat) -> Ordering {
        let metric = self.sort.metric;
        match (a.get(metric), b.get(metric)) {
            (Some(x), Some(y)) => {
                let ord = x.as_f64().total_cmp(&y.as_f64());
                match self.sort.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// One document destined for `collection`.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteAction {
    pub collection: String,
    pub document: PitcherSeasonStat,
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

pub trait StatStore {
    /// Run a filtered, sorted, size-capped search.
    fn search(&self, query: &StatQuery) -> Result<Vec<PitcherSeasonStat>, StoreError>;

    /// Write every action as one batch. Returns the number of documents written.
    fn bulk_write(&self, actions: &[WriteAction]) -> Result<usize, StoreError>;

    fn collection_exists(&self, collection: &str) -> Result<bool, StoreError>;
}

impl<S: StatStore + ?Sized> StatStore for &S {
    fn search(&self, query: &StatQuery) -> Result<Vec<PitcherSeasonStat>, StoreError> {
        (**self).search(query)
    }

    fn bulk_write(&self, actions: &[WriteAction]) -> Result<usize, StoreError> {
        (**self).bulk_write(actions)
    }

    fn collection_exists(&self, collection: &str) -> Result<bool, StoreError> {
        (**self).collection_exists(collection)
    }
}
