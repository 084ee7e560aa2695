//! Ordering primitives: dense ranking, stable sorting and top-n selection.
//!
//! All sorts are stable, so rows with equal measures keep their input order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Total order over measures: NaN sorts above every number, and `-0.0` ties with `0.0`.
    fn order(self, a: f64, b: f64) -> Ordering {
        let ord = (a + 0.0).total_cmp(&(b + 0.0));
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

/// An item paired with its dense rank (1-based).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    pub rank: usize,
    pub item: T,
}

/// Dense-rank `items` by `measure`. Ties share a rank and the next distinct
/// value takes the following rank with no gap. The result is ordered by rank;
/// tied items stay in input order.
pub fn rank<T, F>(items: &[T], measure: F, direction: Direction) -> Vec<Ranked<&T>>
where
    F: Fn(&T) -> f64,
{
    let mut indexed: Vec<(f64, &T)> = items.iter().map(|item| (measure(item), item)).collect();
    indexed.sort_by(|a, b| direction.order(a.0, b.0));

    let mut ranked = Vec::with_capacity(indexed.len());
    let mut current_rank = 0;
    let mut previous: Option<f64> = None;
    for (value, item) in indexed {
        let tied = previous.is_some_and(|p| direction.order(p, value) == Ordering::Equal);
        if !tied {
            current_rank += 1;
        }
        previous = Some(value);
        ranked.push(Ranked {
            rank: current_rank,
            item,
        });
    }
    ranked
}

/// Stable sort by a numeric measure.
pub fn sort_by_measure<T, F>(items: &mut [T], measure: F, direction: Direction)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| direction.order(measure(a), measure(b)));
}

/// The `n` items with the largest measure, ties broken by input order.
pub fn top_n<T: Clone, F>(items: &[T], measure: F, n: usize) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    let mut sorted = items.to_vec();
    sort_by_measure(&mut sorted, measure, Direction::Descending);
    sorted.truncate(n);
    sorted
}

/// The `n` items with the smallest measure, ties broken by input order.
pub fn bottom_n<T: Clone, F>(items: &[T], measure: F, n: usize) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    let mut sorted = items.to_vec();
    sort_by_measure(&mut sorted, measure, Direction::Ascending);
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_dense_rank_with_ties() {
        let values = vec![("a", 5.0), ("b", 9.0), ("c", 5.0), ("d", 1.0)];
        let ranked = rank(&values, |v| v.1, Direction::Descending);
        let got: Vec<(usize, &str)> = ranked.iter().map(|r| (r.rank, r.item.0)).collect();
        assert_eq!(got, vec![(1, "b"), (2, "a"), (2, "c"), (3, "d")]);
    }

    #[test]
    fn test_rank_ascending() {
        let values = vec![3.0, 1.0, 3.0];
        let ranked = rank(&values, |v| *v, Direction::Ascending);
        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 2]);
    }

    #[test]
    fn test_rank_orders_nan_deterministically() {
        let values = vec![2.0, f64::NAN, 1.0, f64::NAN, -0.0, 0.0];
        let ranked = rank(&values, |v| *v, Direction::Ascending);
        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 1, 2, 3, 4, 4]);
        assert!(ranked[4].item.is_nan() && ranked[5].item.is_nan());

        let top = top_n(&values, |v| *v, 3);
        assert!(top[0].is_nan() && top[1].is_nan());
        assert_eq!(top[2], 2.0);
    }

    #[test]
    fn test_top_n_ties_keep_input_order() {
        let values = vec![("a", 2.0), ("b", 7.0), ("c", 7.0), ("d", 7.0)];
        let top = top_n(&values, |v| v.1, 2);
        assert_eq!(top, vec![("b", 7.0), ("c", 7.0)]);
    }

    #[test]
    fn test_bottom_n_shorter_input() {
        let values = vec![4.0, 2.0];
        assert_eq!(bottom_n(&values, |v| *v, 3), vec![2.0, 4.0]);
        assert!(top_n(&Vec::<f64>::new(), |v| *v, 3).is_empty());
    }

    proptest! {
        #[test]
        fn prop_dense_ranks_have_no_gaps(values in proptest::collection::vec(0u8..10, 0..40)) {
            let values: Vec<f64> = values.into_iter().map(f64::from).collect();
            let ranked = rank(&values, |v| *v, Direction::Ascending);
            let mut expected = 1;
            for pair in ranked.windows(2) {
                prop_assert!(pair[1].rank == pair[0].rank || pair[1].rank == pair[0].rank + 1);
                if *pair[0].item == *pair[1].item {
                    prop_assert_eq!(pair[0].rank, pair[1].rank);
                }
            }
            if let Some(last) = ranked.last() {
                let mut distinct = values.clone();
                distinct.sort_by(f64::total_cmp);
                distinct.dedup();
                expected = distinct.len();
                prop_assert_eq!(last.rank, expected);
            }
            prop_assert!(expected >= 1);
        }

        #[test]
        fn prop_ties_preserve_input_order(values in proptest::collection::vec(0u8..4, 0..30)) {
            let tagged: Vec<(usize, f64)> = values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i, f64::from(v)))
                .collect();
            let ranked = rank(&tagged, |t| t.1, Direction::Descending);
            for pair in ranked.windows(2) {
                if pair[0].rank == pair[1].rank {
                    prop_assert!(pair[0].item.0 < pair[1].item.0);
                }
            }
        }
    }
}
