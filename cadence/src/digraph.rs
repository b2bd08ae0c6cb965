use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::sequence::Digraph;

/// Aggregated performance of a single key-to-key transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigraphStat {
    pub prev_key: String,
    pub key: String,
    /// How many times the transition occurred.
    pub count: usize,
    /// Arithmetic mean of the speed over all occurrences.
    pub avg_wpm: f64,
    /// Arithmetic mean of the accuracy over all occurrences.
    pub accuracy: f64,
}

#[derive(Default)]
struct Accumulator {
    count: usize,
    wpm_sum: f64,
    acc_sum: f64,
}

/// Groups the digraph stream by its (prev, key) pair. Rows appear in the
/// order each pair was first seen, which is what the ranked views use for
/// tie-breaking.
pub fn digraph_stats(digraphs: &[Digraph]) -> Vec<DigraphStat> {
    let mut order: Vec<(&str, &str)> = Vec::new();
    let mut groups: HashMap<(&str, &str), Accumulator> = HashMap::new();

    for digraph in digraphs {
        let pair = (digraph.prev.as_str(), digraph.key.as_str());
        let group = groups.entry(pair).or_insert_with(|| {
            order.push(pair);
            Accumulator::default()
        });
        group.count += 1;
        group.wpm_sum += digraph.wpm;
        group.acc_sum += digraph.acc;
    }

    order
        .into_iter()
        .map(|pair| {
            let group = &groups[&pair];
            DigraphStat {
                prev_key: pair.0.to_owned(),
                key: pair.1.to_owned(),
                count: group.count,
                avg_wpm: group.wpm_sum / group.count as f64,
                accuracy: group.acc_sum / group.count as f64,
            }
        })
        .collect()
}

/// The `count` fastest transitions by average speed, descending. The sort
/// is stable, so ties keep their first-seen order.
pub fn rank_fastest(stats: &[DigraphStat], count: usize) -> Vec<DigraphStat> {
    let mut ranked = stats.to_vec();
    ranked.sort_by(|a, b| b.avg_wpm.total_cmp(&a.avg_wpm));
    ranked.truncate(count);
    ranked
}

/// The `count` slowest transitions by average speed, ascending, with the
/// same stable tie-breaking as [`rank_fastest`].
pub fn rank_slowest(stats: &[DigraphStat], count: usize) -> Vec<DigraphStat> {
    let mut ranked = stats.to_vec();
    ranked.sort_by(|a, b| a.avg_wpm.total_cmp(&b.avg_wpm));
    ranked.truncate(count);
    ranked
}

/// Dense prev-key × key grids of transition counts and average speeds.
///
/// Rows cover every observed `prev_key`, columns every observed `key`, both
/// sorted. An unobserved cell holds 0 in both grids; a genuine zero-speed
/// transition is distinguishable from missing data through the count grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionMatrix {
    pub prev_keys: Vec<String>,
    pub keys: Vec<String>,
    pub counts: Vec<Vec<usize>>,
    pub avg_wpm: Vec<Vec<f64>>,
}

impl TransitionMatrix {
    pub fn from_stats(stats: &[DigraphStat]) -> Self {
        let prev_keys: Vec<String> = stats
            .iter()
            .map(|stat| stat.prev_key.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let keys: Vec<String> = stats
            .iter()
            .map(|stat| stat.key.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut counts = vec![vec![0; keys.len()]; prev_keys.len()];
        let mut avg_wpm = vec![vec![0.0; keys.len()]; prev_keys.len()];

        for stat in stats {
            let (Ok(row), Ok(col)) = (
                prev_keys.binary_search(&stat.prev_key),
                keys.binary_search(&stat.key),
            ) else {
                continue;
            };
            counts[row][col] = stat.count;
            avg_wpm[row][col] = stat.avg_wpm;
        }

        Self {
            prev_keys,
            keys,
            counts,
            avg_wpm,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prev_keys.is_empty() || self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digraph(prev: &str, key: &str, wpm: f64, acc: f64) -> Digraph {
        Digraph {
            prev: prev.into(),
            key: key.into(),
            wpm,
            acc,
        }
    }

    #[test]
    fn groups_pairs_in_first_seen_order() {
        let stream = [
            digraph("a", "b", 80.0, 0.9),
            digraph("b", "c", 100.0, 0.95),
            digraph("a", "b", 100.0, 0.7),
        ];

        let stats = digraph_stats(&stream);
        assert_eq!(stats.len(), 2);

        assert_eq!(stats[0].prev_key, "a");
        assert_eq!(stats[0].key, "b");
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[0].avg_wpm, 90.0);
        assert_eq!(stats[0].accuracy, 0.8);

        assert_eq!(stats[1].count, 1);
        assert_eq!(stats[1].avg_wpm, 100.0);
    }

    #[test]
    fn ranked_views_are_reverse_ordered_and_disjoint() {
        let stream = [
            digraph("a", "b", 50.0, 1.0),
            digraph("b", "c", 90.0, 1.0),
            digraph("c", "d", 70.0, 1.0),
            digraph("d", "e", 110.0, 1.0),
            digraph("e", "f", 30.0, 1.0),
            digraph("f", "g", 60.0, 1.0),
        ];
        let stats = digraph_stats(&stream);

        let fastest = rank_fastest(&stats, 2);
        let slowest = rank_slowest(&stats, 2);

        assert_eq!(fastest[0].avg_wpm, 110.0);
        assert_eq!(fastest[1].avg_wpm, 90.0);
        assert_eq!(slowest[0].avg_wpm, 30.0);
        assert_eq!(slowest[1].avg_wpm, 50.0);

        // 6 distinct pairs > 2 * N, so the views cannot overlap.
        for fast in &fastest {
            assert!(
                !slowest
                    .iter()
                    .any(|slow| slow.prev_key == fast.prev_key && slow.key == fast.key)
            );
        }
    }

    #[test]
    fn ties_keep_first_seen_order_in_both_rankings() {
        let stream = [
            digraph("a", "b", 60.0, 1.0),
            digraph("c", "d", 60.0, 1.0),
            digraph("e", "f", 60.0, 1.0),
        ];
        let stats = digraph_stats(&stream);

        let fastest = rank_fastest(&stats, 3);
        let slowest = rank_slowest(&stats, 3);
        let order: Vec<&str> = fastest.iter().map(|stat| stat.prev_key.as_str()).collect();
        assert_eq!(order, ["a", "c", "e"]);
        let order: Vec<&str> = slowest.iter().map(|stat| stat.prev_key.as_str()).collect();
        assert_eq!(order, ["a", "c", "e"]);
    }

    #[test]
    fn matrix_cells_match_pair_counts() {
        let stream = [
            digraph("a", "b", 80.0, 0.9),
            digraph("a", "b", 90.0, 0.9),
            digraph("b", "a", 70.0, 0.9),
        ];
        let stats = digraph_stats(&stream);
        let matrix = TransitionMatrix::from_stats(&stats);

        assert_eq!(matrix.prev_keys, ["a", "b"]);
        assert_eq!(matrix.keys, ["a", "b"]);

        // Rows are prev-keys: a->b twice, b->a once, nothing else.
        assert_eq!(matrix.counts, [[0, 2], [1, 0]]);
        assert_eq!(matrix.avg_wpm[0][1], 85.0);
        assert_eq!(matrix.avg_wpm[1][0], 70.0);

        // Unobserved cells hold the 0 sentinel in both grids.
        assert_eq!(matrix.counts[0][0], 0);
        assert_eq!(matrix.avg_wpm[0][0], 0.0);

        let total: usize = matrix.counts.iter().flatten().sum();
        assert_eq!(total, stream.len());
    }

    #[test]
    fn empty_stream_yields_empty_matrix() {
        let matrix = TransitionMatrix::from_stats(&[]);
        assert!(matrix.is_empty());
        assert!(matrix.counts.is_empty());
    }
}
