use cadence::{
    AnalysisError, DigraphStat, KeyStat, SeriesPoint, TransitionMatrix, TrigramStat, digraph,
    keys, sequence, series, trigram,
};

use crate::{config::Settings, history::History};

/// Everything the viewer shows, computed once from the loaded log.
///
/// Each field is an independent view: one view coming up empty (or the
/// speed series failing for the requested key) never blocks the others.
#[derive(Debug)]
pub struct Analysis {
    pub player: String,
    pub events: usize,
    pub skipped: usize,

    pub keys: Vec<KeyStat>,

    pub fastest: Vec<DigraphStat>,
    pub slowest: Vec<DigraphStat>,
    pub matrix: TransitionMatrix,

    pub trigrams: Vec<TrigramStat>,

    pub target_key: Option<String>,
    pub smoothness: usize,
    pub series: Option<Result<Vec<SeriesPoint>, AnalysisError>>,
}

impl Analysis {
    pub fn compute(history: &History, target_key: Option<&str>, settings: &Settings) -> Self {
        let log = &history.log;

        let pairs = sequence::digraphs(log);
        let digraphs = digraph::digraph_stats(&pairs);
        let fastest = digraph::rank_fastest(&digraphs, settings.digraph_top);
        let slowest = digraph::rank_slowest(&digraphs, settings.digraph_top);
        let matrix = TransitionMatrix::from_stats(&digraphs);

        let chains = sequence::trigrams(log);
        let trigrams = trigram::rank_fastest(&trigram::trigram_stats(&chains), settings.trigram_top);

        let series =
            target_key.map(|key| series::key_speed_series(log, key, settings.smoothness));

        Self {
            player: history.player.clone(),
            events: log.len(),
            skipped: history.skipped,
            keys: keys::key_stats(log),
            fastest,
            slowest,
            matrix,
            trigrams,
            target_key: target_key.map(str::to_owned),
            smoothness: settings.smoothness,
            series,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence::EventLog;
    use cadence::event::KeystrokeEvent;
    use chrono::NaiveDate;

    fn history() -> History {
        let events = [("a", None), ("b", Some("a")), ("c", Some("b"))]
            .into_iter()
            .enumerate()
            .map(|(second, (key, prev))| KeystrokeEvent {
                timestamp: NaiveDate::from_ymd_opt(2024, 5, 17)
                    .unwrap()
                    .and_hms_opt(12, 0, second as u32)
                    .unwrap(),
                key: key.into(),
                prev_key: prev.map(Into::into),
                wpm: 60.0 + second as f64 * 20.0,
                acc: 1.0,
            })
            .collect();

        History {
            player: "isak".into(),
            log: EventLog::new(events),
            skipped: 0,
        }
    }

    #[test]
    fn a_failing_series_does_not_block_the_other_views() {
        let analysis = Analysis::compute(&history(), Some("q"), &Settings::default());

        assert!(matches!(
            analysis.series,
            Some(Err(AnalysisError::KeyNotFound { .. }))
        ));
        assert_eq!(analysis.keys.len(), 3);
        assert_eq!(analysis.fastest.len(), 2);
        assert_eq!(analysis.trigrams.len(), 1);
        assert_eq!(analysis.trigrams[0].sequence, "abc");
    }

    #[test]
    fn no_target_key_means_no_series() {
        let analysis = Analysis::compute(&history(), None, &Settings::default());
        assert!(analysis.series.is_none());
    }
}
