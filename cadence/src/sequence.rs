use crate::event::EventLog;

/// An ordered pair of consecutively typed keys, carrying the trailing
/// keystroke's measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct Digraph {
    pub prev: String,
    pub key: String,
    pub wpm: f64,
    pub acc: f64,
}

/// An ordered triple of consecutively typed keys with no session boundary
/// between any pair. `wpm` is the trailing keystroke's speed.
#[derive(Debug, Clone, PartialEq)]
pub struct Trigram {
    pub first: String,
    pub second: String,
    pub third: String,
    pub wpm: f64,
}

impl Trigram {
    /// The three keys concatenated in order, with no delimiter. This is the
    /// grouping identity of the sequence.
    pub fn sequence(&self) -> String {
        format!("{}{}{}", self.first, self.second, self.third)
    }
}

/// Emits one [`Digraph`] per event that has a recorded predecessor key.
/// Session-start events contribute nothing.
pub fn digraphs(log: &EventLog) -> Vec<Digraph> {
    log.events()
        .iter()
        .filter_map(|event| {
            event.prev_key.as_ref().map(|prev| Digraph {
                prev: prev.clone(),
                key: event.key.clone(),
                wpm: event.wpm,
                acc: event.acc,
            })
        })
        .collect()
}

/// Walks the log once with a two-key lookback window and emits every valid
/// [`Trigram`].
///
/// A chain is valid only when both links agree with the recorded
/// predecessors: event *i*'s `prev_key` must name key *i-1*, and event
/// *i-1*'s `prev_key` must name key *i-2*. A session boundary anywhere in
/// the window breaks the chain, and two more contiguous events are needed
/// before emission resumes. A missing two-back key is never substituted
/// from an earlier session.
pub fn trigrams(log: &EventLog) -> Vec<Trigram> {
    let events = log.events();
    let mut chains = Vec::new();

    for (index, event) in events.iter().enumerate().skip(2) {
        let middle = &events[index - 1];
        let leading = &events[index - 2];

        let trailing_link = event.prev_key.as_deref() == Some(middle.key.as_str());
        let middle_link = middle.prev_key.as_deref() == Some(leading.key.as_str());

        if trailing_link && middle_link {
            chains.push(Trigram {
                first: leading.key.clone(),
                second: middle.key.clone(),
                third: event.key.clone(),
                wpm: event.wpm,
            });
        }
    }

    chains
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeystrokeEvent;
    use chrono::NaiveDate;

    fn event(second: u32, key: &str, prev: Option<&str>, wpm: f64, acc: f64) -> KeystrokeEvent {
        KeystrokeEvent {
            timestamp: NaiveDate::from_ymd_opt(2024, 5, 17)
                .unwrap()
                .and_hms_opt(12, 0, second)
                .unwrap(),
            key: key.into(),
            prev_key: prev.map(Into::into),
            wpm,
            acc,
        }
    }

    fn abc_log() -> EventLog {
        EventLog::new(vec![
            event(0, "a", None, 60.0, 1.0),
            event(1, "b", Some("a"), 80.0, 0.9),
            event(2, "c", Some("b"), 100.0, 0.95),
        ])
    }

    #[test]
    fn digraphs_skip_session_starts() {
        let pairs = digraphs(&abc_log());
        assert_eq!(pairs.len(), 2);
        assert_eq!((pairs[0].prev.as_str(), pairs[0].key.as_str()), ("a", "b"));
        assert_eq!(pairs[0].wpm, 80.0);
        assert_eq!((pairs[1].prev.as_str(), pairs[1].key.as_str()), ("b", "c"));
        assert_eq!(pairs[1].wpm, 100.0);
    }

    #[test]
    fn one_valid_trigram_uses_trailing_wpm() {
        let chains = trigrams(&abc_log());
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].sequence(), "abc");
        assert_eq!(chains[0].wpm, 100.0);
    }

    #[test]
    fn session_boundary_suppresses_trigram_but_not_digraphs() {
        // Same as abc_log, but a new session starts at 'x' between b and c.
        let log = EventLog::new(vec![
            event(0, "a", None, 60.0, 1.0),
            event(1, "b", Some("a"), 80.0, 0.9),
            event(2, "x", None, 50.0, 1.0),
            event(3, "c", Some("x"), 100.0, 0.95),
        ]);

        assert!(trigrams(&log).is_empty());

        let pairs = digraphs(&log);
        assert_eq!(pairs.len(), 3);
        assert_eq!((pairs[0].prev.as_str(), pairs[0].key.as_str()), ("a", "b"));
        assert_eq!((pairs[2].prev.as_str(), pairs[2].key.as_str()), ("x", "c"));
    }

    #[test]
    fn window_refills_after_boundary_before_emitting() {
        let log = EventLog::new(vec![
            event(0, "a", None, 60.0, 1.0),
            event(1, "b", Some("a"), 80.0, 0.9),
            event(2, "x", None, 50.0, 1.0),
            event(3, "y", Some("x"), 55.0, 1.0),
            event(4, "z", Some("y"), 65.0, 1.0),
        ]);

        let chains = trigrams(&log);
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].sequence(), "xyz");
    }

    #[test]
    fn inconsistent_prev_key_breaks_the_chain() {
        // The middle event claims 'q' preceded it, which contradicts the
        // stream. No chain may be guessed out of that.
        let log = EventLog::new(vec![
            event(0, "a", None, 60.0, 1.0),
            event(1, "b", Some("q"), 80.0, 0.9),
            event(2, "c", Some("b"), 100.0, 0.95),
        ]);

        assert!(trigrams(&log).is_empty());
    }

    #[test]
    fn two_events_never_form_a_trigram() {
        let log = EventLog::new(vec![
            event(0, "a", None, 60.0, 1.0),
            event(1, "b", Some("a"), 80.0, 0.9),
        ]);

        assert!(trigrams(&log).is_empty());
    }

    #[test]
    fn overlapping_chains_are_all_emitted() {
        let log = EventLog::new(vec![
            event(0, "t", None, 60.0, 1.0),
            event(1, "h", Some("t"), 70.0, 1.0),
            event(2, "e", Some("h"), 80.0, 1.0),
            event(3, "n", Some("e"), 90.0, 1.0),
        ]);

        let sequences: Vec<String> = trigrams(&log).iter().map(Trigram::sequence).collect();
        assert_eq!(sequences, ["the", "hen"]);
    }
}
