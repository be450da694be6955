// Leaderboard requests as the caller supplies them.

use pitchboard_core::{Metric, MetricError, SortDirection, TeamFilter};
use thiserror::Error;

/// Innings floor for rate leaderboards across the whole league.
pub const QUALIFYING_INNINGS: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankingError {
    #[error("invalid season `{0}`")]
    InvalidSeason(String),

    #[error(transparent)]
    Metric(#[from] MetricError),
}

/// What to rank. `min_innings` and `sort_dir` are explicit caller choices;
/// when absent the service derives them.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRequest {
    pub season: i32,
    pub metric: Metric,
    pub team: TeamFilter,
    pub min_innings: Option<f64>,
    pub sort_dir: Option<SortDirection>,
}

impl LeaderboardRequest {
    pub fn new(season: i32, metric: Metric, team: TeamFilter) -> Self {
        Self {
            season,
            metric,
            team,
            min_innings: None,
            sort_dir: None,
        }
    }

    /// The landing view: league-wide qualified ERA leaders, best first.
    pub fn default_view(season: i32) -> Self {
        Self {
            season,
            metric: Metric::Era,
            team: TeamFilter::All,
            min_innings: Some(QUALIFYING_INNINGS),
            sort_dir: Some(SortDirection::Ascending),
        }
    }

    /// Build a request from raw query parameters. Missing parameters fall
    /// back to `default_season`, `era` and all teams; a blank team means all
    /// teams too. A bad season or metric is an error; a sort direction other
    /// than `asc`/`desc` is ignored.
    pub fn parse(
        season: Option<&str>,
        metric: Option<&str>,
        team: Option<&str>,
        sort_dir: Option<&str>,
        default_season: i32,
    ) -> Result<Self, RankingError> {
        let season = match season {
            Some(raw) => raw
                .trim()
                .parse::<i32>()
                .map_err(|_| RankingError::InvalidSeason(raw.to_string()))?,
            None => default_season,
        };
        let metric = match metric {
            Some(raw) => raw.parse::<Metric>()?,
            None => Metric::Era,
        };
        let team = team
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(TeamFilter::parse)
            .unwrap_or_default();
        let sort_dir = sort_dir.and_then(|raw| raw.parse::<SortDirection>().ok());

        Ok(Self {
            season,
            metric,
            team,
            min_innings: None,
            sort_dir,
        })
    }

    pub fn with_min_innings(mut self, min_innings: f64) -> Self {
        self.min_innings = Some(min_innings);
        self
    }

    pub fn with_sort_dir(mut self, sort_dir: SortDirection) -> Self {
        self.sort_dir = Some(sort_dir);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uses_defaults_for_missing_parameters() {
        let req = LeaderboardRequest::parse(None, None, None, None, 2025).unwrap();
        assert_eq!(req, LeaderboardRequest::new(2025, Metric::Era, TeamFilter::All));
    }

    #[test]
    fn parse_reads_every_parameter() {
        let req =
            LeaderboardRequest::parse(Some("2024"), Some("so"), Some("LG"), Some("asc"), 2025)
                .unwrap();
        assert_eq!(req.season, 2024);
        assert_eq!(req.metric, Metric::So);
        assert_eq!(req.team, TeamFilter::Team("LG".into()));
        assert_eq!(req.sort_dir, Some(SortDirection::Ascending));
        assert_eq!(req.min_innings, None);
    }

    #[test]
    fn blank_team_means_all_teams() {
        for blank in ["", "   "] {
            let req = LeaderboardRequest::parse(None, None, Some(blank), None, 2025).unwrap();
            assert_eq!(req.team, TeamFilter::All);
        }
        let req = LeaderboardRequest::parse(None, None, Some(" LG "), None, 2025).unwrap();
        assert_eq!(req.team, TeamFilter::Team("LG".into()));
    }

    #[test]
    fn invalid_season_is_an_error() {
        let err = LeaderboardRequest::parse(Some("2025a"), None, None, None, 2025).unwrap_err();
        assert_eq!(err, RankingError::InvalidSeason("2025a".into()));
    }

    #[test]
    fn unknown_metric_is_an_error() {
        let err = LeaderboardRequest::parse(None, Some("fip"), None, None, 2025).unwrap_err();
        assert_eq!(
            err,
            RankingError::Metric(MetricError::UnknownMetric("fip".into()))
        );
    }

    #[test]
    fn invalid_sort_dir_is_treated_as_absent() {
        let req = LeaderboardRequest::parse(None, None, None, Some("up"), 2025).unwrap();
        assert_eq!(req.sort_dir, None);
    }

    #[test]
    fn default_view_is_qualified_era_ascending() {
        let req = LeaderboardRequest::default_view(2025);
        assert_eq!(req.metric, Metric::Era);
        assert!(req.team.is_all());
        assert_eq!(req.min_innings, Some(QUALIFYING_INNINGS));
        assert_eq!(req.sort_dir, Some(SortDirection::Ascending));
    }
}
