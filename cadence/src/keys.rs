use std::collections::BTreeMap;

use serde::Serialize;

use crate::event::EventLog;

/// Aggregated performance of a single key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyStat {
    pub key: String,
    /// How many times the key was pressed.
    pub presses: usize,
    /// Arithmetic mean of the speed over all presses.
    pub avg_wpm: f64,
    /// Arithmetic mean of the accuracy over all presses.
    pub accuracy: f64,
}

#[derive(Default)]
struct Accumulator {
    presses: usize,
    wpm_sum: f64,
    acc_sum: f64,
}

/// Groups the log by key (exact, case-sensitive match) and computes one
/// [`KeyStat`] per distinct key, ordered by key.
///
/// Session-start events count like any other press: this view is about raw
/// key performance, not transitions. A key with no events produces no row,
/// so an empty log yields an empty collection rather than degenerate means.
pub fn key_stats(log: &EventLog) -> Vec<KeyStat> {
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();

    for event in log.events() {
        let group = groups.entry(&event.key).or_default();
        group.presses += 1;
        group.wpm_sum += event.wpm;
        group.acc_sum += event.acc;
    }

    groups
        .into_iter()
        .map(|(key, group)| KeyStat {
            key: key.to_owned(),
            presses: group.presses,
            avg_wpm: group.wpm_sum / group.presses as f64,
            accuracy: group.acc_sum / group.presses as f64,
        })
        .collect()
}
