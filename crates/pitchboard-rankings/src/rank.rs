// Competition ranking ("1, 2, 2, 4") over an already-sorted result list.

use pitchboard_core::{Metric, PitcherSeasonStat, StatValue};
use serde::Serialize;

/// A leaderboard row: the stored document plus its display rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPitcher {
    pub rank: usize,
    #[serde(flatten)]
    pub stat: PitcherSeasonStat,
}

/// The value two neighbouring rows are compared on. Floats are rounded to
/// three decimals so that e.g. 2.1049999 and 2.105 tie. Rounding works on the
/// exact stored binary value, so 1.2345 (stored just below) becomes 1.234.
#[derive(Debug, Clone, Copy)]
enum CompareKey {
    Absent,
    Int(i64),
    Float(f64),
}

impl CompareKey {
    fn of(value: Option<StatValue>) -> Self {
        match value {
            None => CompareKey::Absent,
            Some(StatValue::Int(v)) => CompareKey::Int(v),
            Some(StatValue::Float(v)) => CompareKey::Float(round3(v)),
        }
    }
}

impl PartialEq for CompareKey {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (CompareKey::Absent, CompareKey::Absent) => true,
            (CompareKey::Int(a), CompareKey::Int(b)) => a == b,
            (CompareKey::Float(a), CompareKey::Float(b)) => a == b,
            (CompareKey::Int(a), CompareKey::Float(b)) | (CompareKey::Float(b), CompareKey::Int(a)) => {
                a as f64 == b
            }
            _ => false,
        }
    }
}

fn round3(value: f64) -> f64 {
    format!("{value:.3}").parse().unwrap_or(value)
}

/// Assign ranks in sequence order. A row whose `metric` value differs from
/// the previous row's takes its 1-based position as rank; a tied row reuses
/// the previous rank.
pub fn assign_ranks(docs: Vec<PitcherSeasonStat>, metric: Metric) -> Vec<RankedPitcher> {
    let mut last: Option<CompareKey> = None;
    let mut current_rank = 0;

    docs.into_iter()
        .enumerate()
        .map(|(index, stat)| {
            let key = CompareKey::of(stat.get(metric));
            if last != Some(key) {
                current_rank = index + 1;
                last = Some(key);
            }
            RankedPitcher {
                rank: current_rank,
                stat,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(metric: Metric, values: &[StatValue]) -> Vec<PitcherSeasonStat> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| PitcherSeasonStat::new(2025, "KT", format!("P{i}")).with(metric, *v))
            .collect()
    }

    fn ranks(ranked: &[RankedPitcher]) -> Vec<usize> {
        ranked.iter().map(|r| r.rank).collect()
    }

    #[test]
    fn ties_share_rank_and_next_rank_skips() {
        let values = [2.10, 2.10, 2.10, 3.40].map(StatValue::Float);
        let ranked = assign_ranks(docs(Metric::Era, &values), Metric::Era);
        assert_eq!(ranks(&ranked), vec![1, 1, 1, 4]);
    }

    #[test]
    fn one_two_two_four() {
        let values = [252, 207, 207, 180].map(StatValue::Int);
        let ranked = assign_ranks(docs(Metric::So, &values), Metric::So);
        assert_eq!(ranks(&ranked), vec![1, 2, 2, 4]);
    }

    #[test]
    fn distinct_values_rank_by_position() {
        let values = [1.89, 2.25, 2.87, 3.03].map(StatValue::Float);
        let ranked = assign_ranks(docs(Metric::Era, &values), Metric::Era);
        assert_eq!(ranks(&ranked), vec![1, 2, 3, 4]);
    }

    #[test]
    fn floats_tie_after_rounding_to_three_places() {
        let values = [1.0499999, 1.05, 1.0504, 1.06].map(StatValue::Float);
        let ranked = assign_ranks(docs(Metric::Whip, &values), Metric::Whip);
        assert_eq!(ranks(&ranked), vec![1, 1, 1, 4]);
    }

    #[test]
    fn rounding_uses_the_stored_binary_value() {
        // 1.2345 and 1.0005 are stored slightly below the written value
        let values = [1.234, 1.2345].map(StatValue::Float);
        let ranked = assign_ranks(docs(Metric::Whip, &values), Metric::Whip);
        assert_eq!(ranks(&ranked), vec![1, 1]);

        let values = [1.0, 1.0005, 1.001].map(StatValue::Float);
        let ranked = assign_ranks(docs(Metric::Whip, &values), Metric::Whip);
        assert_eq!(ranks(&ranked), vec![1, 1, 3]);
    }

    #[test]
    fn integers_are_compared_exactly() {
        let values = [10, 10, 9].map(StatValue::Int);
        let ranked = assign_ranks(docs(Metric::W, &values), Metric::W);
        assert_eq!(ranks(&ranked), vec![1, 1, 3]);
    }

    #[test]
    fn integer_and_equal_float_tie() {
        let values = [StatValue::Int(3), StatValue::Float(3.0), StatValue::Int(2)];
        let ranked = assign_ranks(docs(Metric::Sv, &values), Metric::Sv);
        assert_eq!(ranks(&ranked), vec![1, 1, 3]);
    }

    #[test]
    fn non_adjacent_equal_values_do_not_tie() {
        let values = [5, 4, 5].map(StatValue::Int);
        let ranked = assign_ranks(docs(Metric::Cg, &values), Metric::Cg);
        assert_eq!(ranks(&ranked), vec![1, 2, 3]);
    }

    #[test]
    fn trailing_absent_values_tie_with_each_other() {
        let mut list = docs(Metric::Era, &[StatValue::Float(2.5)]);
        list.push(PitcherSeasonStat::new(2025, "KT", "no-era-1"));
        list.push(PitcherSeasonStat::new(2025, "KT", "no-era-2"));
        let ranked = assign_ranks(list, Metric::Era);
        assert_eq!(ranks(&ranked), vec![1, 2, 2]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(assign_ranks(Vec::new(), Metric::Era).is_empty());
    }

    #[test]
    fn ranked_row_serializes_flat_with_rank() {
        let ranked = assign_ranks(docs(Metric::Era, &[StatValue::Float(1.89)]), Metric::Era);
        let json = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(json["rank"], 1);
        assert_eq!(json["era"], 1.89);
        assert_eq!(json["player_name"], "P0");
    }
}
