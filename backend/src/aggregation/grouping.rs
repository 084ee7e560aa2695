//! Group-and-aggregate over typed rows.
//!
//! Groups appear in the order their key is first encountered in the input, so a
//! caller that wants a ranking sorts the summaries explicitly.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Aggregation applied to one measure within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggOp {
    Mean,
    Sum,
    Count,
    NUnique,
}

/// A named aggregation over a numeric projection of `R`.
pub struct Aggregation<R> {
    pub op: AggOp,
    measure: fn(&R) -> f64,
}

impl<R> Aggregation<R> {
    pub fn mean(measure: fn(&R) -> f64) -> Self {
        Self {
            op: AggOp::Mean,
            measure,
        }
    }

    pub fn sum(measure: fn(&R) -> f64) -> Self {
        Self {
            op: AggOp::Sum,
            measure,
        }
    }

    pub fn count() -> Self {
        Self {
            op: AggOp::Count,
            measure: |_| 0.0,
        }
    }

    /// Number of distinct measure values in the group.
    pub fn nunique(measure: fn(&R) -> f64) -> Self {
        Self {
            op: AggOp::NUnique,
            measure,
        }
    }

    fn apply(&self, rows: &[&R]) -> f64 {
        match self.op {
            AggOp::Count => rows.len() as f64,
            AggOp::Sum => rows.iter().map(|r| (self.measure)(r)).sum(),
            AggOp::Mean => {
                // NaN cells are skipped
                let values: Vec<f64> = rows
                    .iter()
                    .map(|r| (self.measure)(r))
                    .filter(|v| !v.is_nan())
                    .collect();
                if values.is_empty() {
                    0.0
                } else {
                    values.iter().sum::<f64>() / values.len() as f64
                }
            }
            AggOp::NUnique => {
                let distinct: HashSet<u64> =
                    rows.iter().map(|r| (self.measure)(r).to_bits()).collect();
                distinct.len() as f64
            }
        }
    }
}

/// One summary row per distinct key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary<K> {
    pub key: K,
    /// Number of input rows in the group.
    pub rows: usize,
    /// Aggregated values, positionally matching the requested aggregations.
    pub values: Vec<f64>,
}

impl<K> GroupSummary<K> {
    /// Aggregated value at `index`, or 0.0 if out of range.
    pub fn value(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(0.0)
    }
}

/// Group `rows` by `key` and apply every aggregation per group.
pub fn group_and_aggregate<'a, R, K, I, F>(
    rows: I,
    key: F,
    aggregations: &[Aggregation<R>],
) -> Vec<GroupSummary<K>>
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
    K: Eq + Hash + Clone,
    F: Fn(&R) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a R>)> = Vec::new();

    for row in rows {
        let k = key(row);
        match index.get(&k) {
            Some(&i) => groups[i].1.push(row),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![row]));
            }
        }
    }

    groups
        .into_iter()
        .map(|(key, members)| GroupSummary {
            values: aggregations.iter().map(|agg| agg.apply(&members)).collect(),
            rows: members.len(),
            key,
        })
        .collect()
}

/// Sum a measure per key, preserving first-encounter key order.
pub fn sum_by<'a, R, K, I, F, M>(rows: I, key: F, measure: M) -> Vec<(K, f64)>
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
    K: Eq + Hash + Clone,
    F: Fn(&R) -> K,
    M: Fn(&R) -> f64,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut totals: Vec<(K, f64)> = Vec::new();
    for row in rows {
        let k = key(row);
        let v = measure(row);
        match index.get(&k) {
            Some(&i) => totals[i].1 += v,
            None => {
                index.insert(k.clone(), totals.len());
                totals.push((k, v));
            }
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Obs {
        zone: &'static str,
        pct: f64,
        pax: i64,
    }

    fn obs(zone: &'static str, pct: f64, pax: i64) -> Obs {
        Obs { zone, pct, pax }
    }

    #[test]
    fn test_groups_follow_first_encounter_order() {
        let rows = vec![obs("B", 90.0, 10), obs("A", 80.0, 5), obs("B", 70.0, 20)];
        let groups = group_and_aggregate(
            &rows,
            |r| r.zone,
            &[
                Aggregation::mean(|r: &Obs| r.pct),
                Aggregation::sum(|r: &Obs| r.pax as f64),
                Aggregation::count(),
                Aggregation::nunique(|r: &Obs| r.pct),
            ],
        );

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "B");
        assert_eq!(groups[0].rows, 2);
        assert_eq!(groups[0].values, vec![80.0, 30.0, 2.0, 2.0]);
        assert_eq!(groups[1].key, "A");
        assert_eq!(groups[1].value(1), 5.0);
        assert_eq!(groups[1].value(9), 0.0);
    }

    #[test]
    fn test_empty_input_gives_no_groups() {
        let rows: Vec<Obs> = Vec::new();
        let groups = group_and_aggregate(&rows, |r| r.zone, &[Aggregation::count()]);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_sum_by() {
        let rows = vec![obs("x", 1.0, 1), obs("y", 2.0, 2), obs("x", 3.0, 3)];
        let totals = sum_by(&rows, |r| r.zone, |r| r.pax as f64);
        assert_eq!(totals, vec![("x", 4.0), ("y", 2.0)]);
    }
}
