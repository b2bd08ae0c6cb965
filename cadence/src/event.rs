use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single recorded key press.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeystrokeEvent {
    /// When the key was pressed. Only used to establish chronological order.
    pub timestamp: NaiveDateTime,
    /// The key that was pressed.
    pub key: String,
    /// The key pressed immediately before this one, or `None` when this
    /// press opened a new typing session.
    pub prev_key: Option<String>,
    /// Instantaneous speed attributed to this keystroke.
    pub wpm: f64,
    /// Instantaneous accuracy of this keystroke, in `0.0..=1.0`.
    pub acc: f64,
}

impl KeystrokeEvent {
    /// Whether this press opened a new typing session.
    pub const fn is_session_start(&self) -> bool {
        self.prev_key.is_none()
    }
}

/// One player's ordered, read-only log of keystroke events.
///
/// Everything the crate computes is derived from this collection. The
/// constructor checks chronological order instead of assuming it: a log
/// whose file order disagrees with its timestamps is stably re-sorted.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<KeystrokeEvent>,
}

impl EventLog {
    pub fn new(mut events: Vec<KeystrokeEvent>) -> Self {
        if !events.is_sorted_by_key(|event| event.timestamp) {
            events.sort_by_key(|event| event.timestamp);
        }
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The events in chronological order.
    pub fn events(&self) -> &[KeystrokeEvent] {
        &self.events
    }

    /// Iterates over the events recorded for `key` (exact, case-sensitive
    /// match), preserving chronological order.
    pub fn for_key<'log>(
        &'log self,
        key: &'log str,
    ) -> impl Iterator<Item = &'log KeystrokeEvent> {
        self.events.iter().filter(move |event| event.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(second: u32, key: &str) -> KeystrokeEvent {
        KeystrokeEvent {
            timestamp: NaiveDate::from_ymd_opt(2024, 5, 17)
                .unwrap()
                .and_hms_opt(12, 0, second)
                .unwrap(),
            key: key.into(),
            prev_key: None,
            wpm: 60.0,
            acc: 1.0,
        }
    }

    #[test]
    fn ordered_input_is_kept_as_is() {
        let log = EventLog::new(vec![event(0, "a"), event(1, "b"), event(2, "c")]);
        let keys: Vec<_> = log.events().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn unordered_input_is_sorted_chronologically() {
        let log = EventLog::new(vec![event(2, "c"), event(0, "a"), event(1, "b")]);
        let keys: Vec<_> = log.events().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn equal_timestamps_keep_file_order() {
        // Stable sort: the trainer flushes a whole game with one timestamp.
        let log = EventLog::new(vec![event(1, "x"), event(0, "a"), event(0, "b")]);
        let keys: Vec<_> = log.events().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["a", "b", "x"]);
    }

    #[test]
    fn for_key_filters_and_preserves_order() {
        let mut second = event(1, "a");
        second.wpm = 80.0;
        let log = EventLog::new(vec![event(0, "a"), event(2, "b"), second]);

        let wpm: Vec<f64> = log.for_key("a").map(|e| e.wpm).collect();
        assert_eq!(wpm, [60.0, 80.0]);
        assert_eq!(log.for_key("z").count(), 0);
    }
}
