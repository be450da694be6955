// Canonical pitching metrics and sort direction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricError {
    #[error("unknown metric `{0}`")]
    UnknownMetric(String),

    #[error("unknown sort direction `{0}` (expected `asc` or `desc`)")]
    UnknownSortDirection(String),
}

// ---------------------------------------------------------------------------
// Metric
// ---------------------------------------------------------------------------

/// A pitching statistic stored on a season document.
///
/// The canonical key (`as_key`) is the store-facing field name; the label is
/// the abbreviation shown in the source sheets and on leaderboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Era,
    G,
    W,
    L,
    Sv,
    Hld,
    Wpct,
    Ip,
    H,
    Hr,
    Bb,
    Hbp,
    So,
    R,
    Er,
    Whip,
    Cg,
    Sho,
    Qs,
    Bsv,
    Tbf,
    Np,
    Avg,
    #[serde(rename = "2b")]
    Doubles,
    #[serde(rename = "3b")]
    Triples,
    Sac,
    Sf,
    Ibb,
    Wp,
    Bk,
}

impl Metric {
    /// Every metric, in leaderboard selector order.
    pub const ALL: [Metric; 30] = [
        Metric::Era,
        Metric::G,
        Metric::W,
        Metric::L,
        Metric::Sv,
        Metric::Hld,
        Metric::Wpct,
        Metric::Ip,
        Metric::H,
        Metric::Hr,
        Metric::Bb,
        Metric::Hbp,
        Metric::So,
        Metric::R,
        Metric::Er,
        Metric::Whip,
        Metric::Cg,
        Metric::Sho,
        Metric::Qs,
        Metric::Bsv,
        Metric::Tbf,
        Metric::Np,
        Metric::Avg,
        Metric::Doubles,
        Metric::Triples,
        Metric::Sac,
        Metric::Sf,
        Metric::Ibb,
        Metric::Wp,
        Metric::Bk,
    ];

    /// Store-facing field name.
    pub fn as_key(&self) -> &'static str {
        match self {
            Metric::Era => "era",
            Metric::G => "g",
            Metric::W => "w",
            Metric::L => "l",
            Metric::Sv => "sv",
            Metric::Hld => "hld",
            Metric::Wpct => "wpct",
            Metric::Ip => "ip",
            Metric::H => "h",
            Metric::Hr => "hr",
            Metric::Bb => "bb",
            Metric::Hbp => "hbp",
            Metric::So => "so",
            Metric::R => "r",
            Metric::Er => "er",
            Metric::Whip => "whip",
            Metric::Cg => "cg",
            Metric::Sho => "sho",
            Metric::Qs => "qs",
            Metric::Bsv => "bsv",
            Metric::Tbf => "tbf",
            Metric::Np => "np",
            Metric::Avg => "avg",
            Metric::Doubles => "2b",
            Metric::Triples => "3b",
            Metric::Sac => "sac",
            Metric::Sf => "sf",
            Metric::Ibb => "ibb",
            Metric::Wp => "wp",
            Metric::Bk => "bk",
        }
    }

    /// Display label, identical to the source sheet column header.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Era => "ERA",
            Metric::G => "G",
            Metric::W => "W",
            Metric::L => "L",
            Metric::Sv => "SV",
            Metric::Hld => "HLD",
            Metric::Wpct => "WPCT",
            Metric::Ip => "IP",
            Metric::H => "H",
            Metric::Hr => "HR",
            Metric::Bb => "BB",
            Metric::Hbp => "HBP",
            Metric::So => "SO",
            Metric::R => "R",
            Metric::Er => "ER",
            Metric::Whip => "WHIP",
            Metric::Cg => "CG",
            Metric::Sho => "SHO",
            Metric::Qs => "QS",
            Metric::Bsv => "BSV",
            Metric::Tbf => "TBF",
            Metric::Np => "NP",
            Metric::Avg => "AVG",
            Metric::Doubles => "2B",
            Metric::Triples => "3B",
            Metric::Sac => "SAC",
            Metric::Sf => "SF",
            Metric::Ibb => "IBB",
            Metric::Wp => "WP",
            Metric::Bk => "BK",
        }
    }

    /// Metrics where a smaller value is the better result.
    pub fn lower_is_better(&self) -> bool {
        matches!(self, Metric::Era | Metric::Whip | Metric::Avg)
    }

    /// Ratio metrics that are only meaningful above an innings sample size.
    pub fn is_rate_based(&self) -> bool {
        matches!(self, Metric::Era | Metric::Wpct | Metric::Whip | Metric::Avg)
    }

    /// Direction a leaderboard for this metric sorts in when the caller
    /// does not choose one.
    pub fn default_direction(&self) -> SortDirection {
        if self.lower_is_better() {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl FromStr for Metric {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.as_key() == key)
            .ok_or_else(|| MetricError::UnknownMetric(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// SortDirection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            other => Err(MetricError::UnknownSortDirection(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
