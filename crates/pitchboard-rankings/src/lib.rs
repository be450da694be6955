// Pitcher leaderboards: eligibility, store query construction and
// competition ranking.

pub mod query;
pub mod rank;
pub mod request;
pub mod service;

pub use rank::{assign_ranks, RankedPitcher};
pub use request::{LeaderboardRequest, RankingError, QUALIFYING_INNINGS};
pub use service::{Leaderboard, RankingService};
