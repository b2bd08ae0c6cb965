use std::collections::HashMap;

use serde::Serialize;

use crate::sequence::Trigram;

/// Aggregated speed of a three-key sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrigramStat {
    /// The three keys concatenated in order, with no delimiter.
    pub sequence: String,
    /// How many times the sequence occurred.
    pub count: usize,
    /// Arithmetic mean of the trailing keystroke's speed over all
    /// occurrences.
    pub avg_wpm: f64,
}

#[derive(Default)]
struct Accumulator {
    count: usize,
    wpm_sum: f64,
}

/// Groups the trigram stream by sequence identity. Rows appear in the order
/// each sequence was first seen.
pub fn trigram_stats(trigrams: &[Trigram]) -> Vec<TrigramStat> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Accumulator> = HashMap::new();

    for trigram in trigrams {
        let sequence = trigram.sequence();
        let group = groups.entry(sequence.clone()).or_insert_with(|| {
            order.push(sequence);
            Accumulator::default()
        });
        group.count += 1;
        group.wpm_sum += trigram.wpm;
    }

    order
        .into_iter()
        .map(|sequence| {
            let group = &groups[&sequence];
            TrigramStat {
                count: group.count,
                avg_wpm: group.wpm_sum / group.count as f64,
                sequence,
            }
        })
        .collect()
}

/// The `count` fastest sequences by average speed, descending. The sort is
/// stable, so ties keep their first-occurrence order.
pub fn rank_fastest(stats: &[TrigramStat], count: usize) -> Vec<TrigramStat> {
    let mut ranked = stats.to_vec();
    ranked.sort_by(|a, b| b.avg_wpm.total_cmp(&a.avg_wpm));
    ranked.truncate(count);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigram(keys: [&str; 3], wpm: f64) -> Trigram {
        Trigram {
            first: keys[0].into(),
            second: keys[1].into(),
            third: keys[2].into(),
            wpm,
        }
    }

    #[test]
    fn groups_by_concatenated_sequence() {
        let stream = [
            trigram(["t", "h", "e"], 100.0),
            trigram(["a", "n", "d"], 80.0),
            trigram(["t", "h", "e"], 120.0),
        ];

        let stats = trigram_stats(&stream);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].sequence, "the");
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[0].avg_wpm, 110.0);
        assert_eq!(stats[1].sequence, "and");
        assert_eq!(stats[1].avg_wpm, 80.0);
    }

    #[test]
    fn ranked_fastest_is_descending_with_stable_ties() {
        let stream = [
            trigram(["a", "b", "c"], 90.0),
            trigram(["d", "e", "f"], 110.0),
            trigram(["g", "h", "i"], 90.0),
        ];
        let stats = trigram_stats(&stream);

        let ranked = rank_fastest(&stats, 3);
        let sequences: Vec<&str> = ranked.iter().map(|stat| stat.sequence.as_str()).collect();
        assert_eq!(sequences, ["def", "abc", "ghi"]);

        assert_eq!(rank_fastest(&stats, 1).len(), 1);
    }

    #[test]
    fn empty_stream_yields_no_rows() {
        assert!(trigram_stats(&[]).is_empty());
    }
}
