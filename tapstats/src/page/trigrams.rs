use cadence::TrigramStat;
use ratatui::{
    Frame,
    layout::Rect,
    style::Stylize,
    text::{Line, ToSpan},
    widgets::{List, Paragraph},
};

use crate::{analysis::Analysis, config::Config, utils::ROUNDED_BLOCK};

/// Page: Fastest three-key sequences
pub struct Trigrams {
    stats: Vec<TrigramStat>,
}

impl Trigrams {
    pub fn new(analysis: &Analysis) -> Self {
        Self {
            stats: analysis.trigrams.clone(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, _config: &Config) {
        if self.stats.is_empty() {
            let no_data = Paragraph::new(
                "No trigrams recorded.\nThree keys in a row without a session break are needed.",
            )
            .block(ROUNDED_BLOCK.title("Trigrams".to_span().bold()))
            .centered();
            frame.render_widget(no_data, area);
            return;
        }

        let items = self.stats.iter().enumerate().map(|(index, stat)| {
            Line::from(format!(
                "{:>2}. {:<8} {:>7.2} wpm  x{}",
                index + 1,
                stat.sequence,
                stat.avg_wpm,
                stat.count
            ))
        });

        let list =
            List::new(items).block(ROUNDED_BLOCK.title("Fastest trigrams".to_span().bold()));
        frame.render_widget(list, area);
    }
}
