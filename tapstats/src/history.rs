use std::path::{Path, PathBuf};

use cadence::event::{EventLog, KeystrokeEvent};
use chrono::NaiveDateTime;
use derive_more::From;
use thiserror::Error;

const HISTORY_SUFFIX: &str = ".key-history.csv";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What the trainer writes in the `prevKey` column for the first keystroke
/// of a session. An empty field is accepted as equivalent.
const NO_PREV_KEY: &str = "NONE";

#[derive(Debug, Error, From)]
pub enum HistoryError {
    #[error("failed to read stats directory '{directory}': {error}")]
    #[from(skip)]
    ReadDirectory {
        directory: PathBuf,
        error: std::io::Error,
    },

    #[error("failed to read history file: {0}")]
    ReadFile(std::io::Error),

    #[error("no key history found for player '{player}' (known players: {})", known_players(available))]
    #[from(skip)]
    UnknownPlayer {
        player: String,
        available: Vec<String>,
    },

    #[error("key history for player '{player}' contains no usable events")]
    #[from(skip)]
    Empty { player: String },
}

fn known_players(available: &[String]) -> String {
    if available.is_empty() {
        "none".to_owned()
    } else {
        available.join(", ")
    }
}

/// One player's loaded key history, plus how many rows had to be skipped to
/// parse it.
#[derive(Debug)]
pub struct History {
    pub player: String,
    pub log: EventLog,
    /// Rows missing a usable key or speed value. Skips are reported, never
    /// fatal.
    pub skipped: usize,
}

impl History {
    /// Loads `<stats_dir>/<player>.key-history.csv`.
    ///
    /// The only fatal outcomes are a missing file and a log that is empty
    /// after skipping malformed rows.
    pub fn load(stats_dir: &Path, player: &str) -> Result<Self, HistoryError> {
        let path = stats_dir.join(format!("{player}{HISTORY_SUFFIX}"));
        if !path.is_file() {
            return Err(HistoryError::UnknownPlayer {
                player: player.to_owned(),
                available: players(stats_dir).unwrap_or_default(),
            });
        }

        let content = std::fs::read_to_string(&path)?;
        let (events, skipped) = parse_history(&content);
        if events.is_empty() {
            return Err(HistoryError::Empty {
                player: player.to_owned(),
            });
        }

        Ok(Self {
            player: player.to_owned(),
            log: EventLog::new(events),
            skipped,
        })
    }
}

/// Lists the players that have a key history in `stats_dir`, sorted.
pub fn players(stats_dir: &Path) -> Result<Vec<String>, HistoryError> {
    if !stats_dir.exists() {
        return Ok(Vec::new());
    }

    let entries = stats_dir
        .read_dir()
        .map_err(|error| HistoryError::ReadDirectory {
            directory: stats_dir.to_path_buf(),
            error,
        })?;

    let mut found = Vec::new();
    for entry in entries {
        let name = entry?.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some(player) = name.strip_suffix(HISTORY_SUFFIX) {
            found.push(player.to_owned());
        }
    }

    found.sort();
    Ok(found)
}

/// Parses `date,key,prevKey,wpm,acc` rows into events, counting the rows
/// that could not be used.
fn parse_history(content: &str) -> (Vec<KeystrokeEvent>, usize) {
    let mut events = Vec::new();
    let mut skipped = 0;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("date,") {
            continue;
        }

        match parse_row(line) {
            Some(event) => events.push(event),
            None => skipped += 1,
        }
    }

    (events, skipped)
}

fn parse_row(line: &str) -> Option<KeystrokeEvent> {
    let mut fields = line.split(',');
    let date = fields.next()?;
    let key = fields.next()?.trim();
    let prev_key = fields.next()?.trim();
    let wpm = fields.next()?;
    let acc = fields.next()?;
    if fields.next().is_some() {
        return None;
    }

    let timestamp = NaiveDateTime::parse_from_str(date.trim(), DATE_FORMAT).ok()?;
    if key.is_empty() {
        return None;
    }
    let wpm: f64 = wpm.trim().parse().ok()?;
    if !wpm.is_finite() || wpm < 0.0 {
        return None;
    }
    // The trainer writes per-press correctness as 0/1, which parses as a
    // valid accuracy.
    let acc: f64 = acc.trim().parse().ok()?;
    if !(0.0..=1.0).contains(&acc) {
        return None;
    }

    let prev_key = match prev_key {
        "" | NO_PREV_KEY => None,
        prev => Some(prev.to_owned()),
    };

    Some(KeystrokeEvent {
        timestamp,
        key: key.to_owned(),
        prev_key,
        wpm,
        acc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence::keys;

    const SAMPLE: &str = "\
date,key,prevKey,wpm,acc
2024-05-17 12:00:00,a,NONE,60.000000,1
2024-05-17 12:00:01,b,a,80.000000,0
2024-05-17 12:00:02,c,b,100.000000,1
";

    #[test]
    fn parses_rows_and_sentinel() {
        let (events, skipped) = parse_history(SAMPLE);
        assert_eq!(events.len(), 3);
        assert_eq!(skipped, 0);

        assert_eq!(events[0].key, "a");
        assert_eq!(events[0].prev_key, None);
        assert_eq!(events[0].wpm, 60.0);
        assert_eq!(events[0].acc, 1.0);
        assert_eq!(events[1].prev_key.as_deref(), Some("a"));
        assert_eq!(events[1].acc, 0.0);
    }

    #[test]
    fn empty_prev_key_field_is_a_session_start() {
        let (events, skipped) = parse_history("2024-05-17 12:00:00,a,,60.0,1\n");
        assert_eq!(skipped, 0);
        assert_eq!(events[0].prev_key, None);
    }

    #[test]
    fn malformed_rows_are_skipped_and_counted() {
        let content = "\
date,key,prevKey,wpm,acc
2024-05-17 12:00:00,a,NONE,60.0,1
not a date,b,a,80.0,1
2024-05-17 12:00:02,,a,80.0,1
2024-05-17 12:00:03,c,b,not-a-number,1
2024-05-17 12:00:04,d,c,90.0,1
";
        let (events, skipped) = parse_history(content);
        assert_eq!(events.len(), 2);
        assert_eq!(skipped, 3);
    }

    #[test]
    fn out_of_range_accuracy_is_skipped() {
        let (events, skipped) = parse_history("2024-05-17 12:00:00,a,NONE,60.0,1.5\n");
        assert!(events.is_empty());
        assert_eq!(skipped, 1);
    }

    #[test]
    fn presses_sum_to_total_rows_minus_skips() {
        let content = "\
2024-05-17 12:00:00,a,NONE,60.0,1
garbage line with no commas at all but text
2024-05-17 12:00:01,b,a,80.0,1
2024-05-17 12:00:02,a,b,70.0,0
";
        let (events, skipped) = parse_history(content);
        let log = EventLog::new(events);
        let presses: usize = keys::key_stats(&log).iter().map(|stat| stat.presses).sum();
        assert_eq!(presses, 4 - skipped);
        assert_eq!(skipped, 1);
    }
}
