// Direction, eligibility and store query construction.

use pitchboard_core::{Filter, Metric, SortDirection, SortSpec, StatQuery, TOP_N};

use crate::request::{LeaderboardRequest, QUALIFYING_INNINGS};

/// An explicit direction wins; otherwise the metric's natural order.
pub fn resolve_direction(metric: Metric, requested: Option<SortDirection>) -> SortDirection {
    requested.unwrap_or_else(|| metric.default_direction())
}

/// The innings floor actually applied to a request.
///
/// League-wide rate leaderboards require `QUALIFYING_INNINGS` unless the
/// caller set a floor. Team leaderboards show the whole staff: no automatic
/// floor, only an explicit one.
pub fn effective_min_innings(request: &LeaderboardRequest) -> Option<f64> {
    if request.min_innings.is_some() {
        return request.min_innings;
    }
    if request.team.is_all() && request.metric.is_rate_based() {
        Some(QUALIFYING_INNINGS)
    } else {
        None
    }
}

/// Translate a request into a store query against `collection`.
pub fn build_query(
    collection: &str,
    request: &LeaderboardRequest,
    direction: SortDirection,
    min_innings: Option<f64>,
) -> StatQuery {
    let mut filters = vec![Filter::Season(request.season)];
    if let Some(team) = request.team.team() {
        filters.push(Filter::Team(team.to_string()));
    }
    if let Some(min) = min_innings {
        filters.push(Filter::AtLeast {
            metric: Metric::Ip,
            min,
        });
    }

    StatQuery {
        collection: collection.to_string(),
        filters,
        sort: SortSpec {
            metric: request.metric,
            direction,
        },
        size: TOP_N,
    }
}
