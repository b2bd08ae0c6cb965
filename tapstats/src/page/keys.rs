use cadence::KeyStat;
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, ToSpan},
    widgets::{Bar, BarChart, BarGroup, Paragraph},
};

use crate::{analysis::Analysis, app::Message, config::Config, utils::{KeyEventHelper, ROUNDED_BLOCK}};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
enum Metric {
    #[strum(serialize = "Average WPM")]
    AvgWpm,
    #[strum(serialize = "Accuracy")]
    Accuracy,
    #[strum(serialize = "Presses")]
    Presses,
}

impl Metric {
    const fn next(self) -> Self {
        match self {
            Self::AvgWpm => Self::Accuracy,
            Self::Accuracy => Self::Presses,
            Self::Presses => Self::AvgWpm,
        }
    }
}

/// Page: Per-key performance
///
/// One bar per key; <Tab> cycles between speed, accuracy and usage.
pub struct Keys {
    stats: Vec<KeyStat>,
    metric: Metric,
}

impl Keys {
    pub fn new(analysis: &Analysis) -> Self {
        Self {
            stats: analysis.keys.clone(),
            metric: Metric::AvgWpm,
        }
    }

    fn bar(&self, stat: &KeyStat, config: &Config) -> Bar<'_> {
        let (value, text) = match self.metric {
            Metric::AvgWpm => (stat.avg_wpm.round() as u64, format!("{:.0}", stat.avg_wpm)),
            Metric::Accuracy => (
                (stat.accuracy * 100.0).round() as u64,
                format!("{:.0}%", stat.accuracy * 100.0),
            ),
            Metric::Presses => (stat.presses as u64, stat.presses.to_string()),
        };

        Bar::default()
            .value(value)
            .text_value(text)
            .label(Line::from(stat.key.clone()))
            .style(Style::default().fg(config.settings.theme.plot.bar))
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config) {
        if self.stats.is_empty() {
            let no_data = Paragraph::new("No key presses recorded.")
                .block(ROUNDED_BLOCK.title("Keys".to_span().bold()))
                .centered();
            frame.render_widget(no_data, area);
            return;
        }

        let bars: Vec<Bar> = self
            .stats
            .iter()
            .map(|stat| self.bar(stat, config))
            .collect();

        let title = format!("{} per key", self.metric);
        let chart = BarChart::default()
            .block(ROUNDED_BLOCK.title(title.to_span().bold()))
            .bar_width(4)
            .bar_gap(1)
            .data(BarGroup::default().bars(&bars));

        frame.render_widget(chart, area);
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::raw("<Tab> metric | <Left/Right> view"))
    }

    pub fn handle_events(&mut self, event: &Event, _config: &Config) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
            && key.code == KeyCode::Tab
        {
            self.metric = self.metric.next();
        }

        None
    }
}
