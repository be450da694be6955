// Leaderboard retrieval against an injected stat store.

use pitchboard_core::{Metric, SortDirection, StatStore, TeamFilter};
use serde::Serialize;
use tracing::{debug, error};

use crate::query::{build_query, effective_min_innings, resolve_direction};
use crate::rank::{assign_ranks, RankedPitcher};
use crate::request::LeaderboardRequest;

/// A ranked leaderboard plus the settings that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    pub season: i32,
    pub metric: Metric,
    #[serde(serialize_with = "serialize_team")]
    pub team: TeamFilter,
    pub sort_dir: SortDirection,
    /// Innings floor that was applied, explicit or automatic.
    pub min_innings: Option<f64>,
    pub entries: Vec<RankedPitcher>,
}

fn serialize_team<S: serde::Serializer>(team: &TeamFilter, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(team)
}

pub struct RankingService<S> {
    store: S,
    collection: String,
}

impl<S: StatStore> RankingService<S> {
    pub fn new(store: S, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch and rank the top pitchers for `request`.
    ///
    /// Store failures do not propagate: they are logged and produce an
    /// empty leaderboard that still reports the resolved direction.
    pub fn top_pitchers(&self, request: &LeaderboardRequest) -> Leaderboard {
        let sort_dir = resolve_direction(request.metric, request.sort_dir);
        let min_innings = effective_min_innings(request);
        let query = build_query(&self.collection, request, sort_dir, min_innings);
        debug!("leaderboard query: {query:?}");

        let entries = match self.store.search(&query) {
            Ok(docs) => assign_ranks(docs, request.metric),
            Err(e) => {
                error!(
                    "leaderboard search failed (season={}, metric={}, team={}): {e}",
                    request.season, request.metric, request.team
                );
                Vec::new()
            }
        };

        Leaderboard {
            season: request.season,
            metric: request.metric,
            team: request.team.clone(),
            sort_dir,
            min_innings,
            entries,
        }
    }
}
