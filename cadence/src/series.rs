use serde::Serialize;

use crate::{error::AnalysisError, event::EventLog};

/// One smoothed sample of a key's speed history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// 1-based rank of the press among all presses of the key.
    pub instance: usize,
    /// Trailing mean of the speed over up to `window` samples.
    pub wpm: f64,
}

/// Extracts the chronological speed samples for `key` and smooths them with
/// a trailing rolling mean.
///
/// The i-th point averages samples `max(1, i - window + 1)..=i`: the window
/// shrinks at the start of the series and never looks ahead, so a window of
/// 1 reproduces the raw series unchanged. The mean is taken over an
/// index-bounded slice each step, so no running sum can drift.
///
/// Fails with [`AnalysisError::InvalidWindow`] when `window` is 0 and with
/// [`AnalysisError::KeyNotFound`] when the key has no recorded events.
pub fn key_speed_series(
    log: &EventLog,
    key: &str,
    window: usize,
) -> Result<Vec<SeriesPoint>, AnalysisError> {
    if window == 0 {
        return Err(AnalysisError::InvalidWindow { window });
    }

    let samples: Vec<f64> = log.for_key(key).map(|event| event.wpm).collect();
    if samples.is_empty() {
        return Err(AnalysisError::KeyNotFound {
            key: key.to_owned(),
        });
    }

    let points = samples
        .iter()
        .enumerate()
        .map(|(index, _)| {
            let start = (index + 1).saturating_sub(window);
            let tail = &samples[start..=index];
            SeriesPoint {
                instance: index + 1,
                wpm: tail.iter().sum::<f64>() / tail.len() as f64,
            }
        })
        .collect();

    Ok(points)
}
