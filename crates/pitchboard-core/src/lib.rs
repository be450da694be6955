// Shared schema, store seam, SQLite store and configuration for the
// pitcher leaderboard tools.

pub mod config;
pub mod db;
pub mod logging;
pub mod metric;
pub mod stat;
pub mod store;
pub mod team;

pub use metric::{Metric, MetricError, SortDirection};
pub use stat::{PitcherSeasonStat, StatValue};
pub use store::{Filter, SortSpec, StatQuery, StatStore, StoreError, WriteAction, TOP_N};
pub use team::TeamFilter;
