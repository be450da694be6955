// Pitcher season documents as written to and read from the stat store.

use crate::metric::Metric;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A numeric cell value. Integer counting stats keep their integer type so
/// that leaderboards compare them exactly; decimals stay floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
}

impl StatValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            StatValue::Int(v) => v as f64,
            StatValue::Float(v) => v,
        }
    }
}

impl From<i64> for StatValue {
    fn from(v: i64) -> Self {
        StatValue::Int(v)
    }
}

impl From<i32> for StatValue {
    fn from(v: i32) -> Self {
        StatValue::Int(v.into())
    }
}

impl From<f64> for StatValue {
    fn from(v: f64) -> Self {
        StatValue::Float(v)
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Int(v) => write!(f, "{v}"),
            StatValue::Float(v) => write!(f, "{v}"),
        }
    }
}

/// One pitcher's line for one season with one team.
///
/// `stats` only holds metrics the source sheet actually provided; a missing
/// key means "no data", never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitcherSeasonStat {
    pub season: i32,
    pub team: String,
    pub player_name: String,
    #[serde(flatten)]
    pub stats: BTreeMap<Metric, StatValue>,
}

impl PitcherSeasonStat {
    pub fn new(season: i32, team: impl Into<String>, player_name: impl Into<String>) -> Self {
        Self {
            season,
            team: team.into(),
            player_name: player_name.into(),
            stats: BTreeMap::new(),
        }
    }

    /// Builder-style setter, mostly for fixtures.
    pub fn with(mut self, metric: Metric, value: impl Into<StatValue>) -> Self {
        self.stats.insert(metric, value.into());
        self
    }

    pub fn get(&self, metric: Metric) -> Option<StatValue> {
        self.stats.get(&metric).copied()
    }

    /// Innings pitched, the field eligibility floors filter on.
    pub fn innings(&self) -> Option<f64> {
        self.get(Metric::Ip).map(|v| v.as_f64())
    }
}
