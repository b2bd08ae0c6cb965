use cadence::{DigraphStat, TransitionMatrix};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span, ToSpan},
    widgets::{List, Paragraph},
};

use crate::{analysis::Analysis, app::Message, config::Config, utils::{KeyEventHelper, ROUNDED_BLOCK}};

#[derive(Debug, Clone, Copy)]
enum ViewMode {
    Ranked,
    CountMatrix,
    SpeedMatrix,
}

impl ViewMode {
    const fn next(self) -> Self {
        match self {
            Self::Ranked => Self::CountMatrix,
            Self::CountMatrix => Self::SpeedMatrix,
            Self::SpeedMatrix => Self::Ranked,
        }
    }
}

/// Page: Key-to-key transitions
///
/// Ranked fastest/slowest digraph tables, plus dense prev-key × key grids
/// of counts and average speeds. <Tab> cycles the three views.
pub struct Transitions {
    fastest: Vec<DigraphStat>,
    slowest: Vec<DigraphStat>,
    matrix: TransitionMatrix,
    view_mode: ViewMode,
}

impl Transitions {
    pub fn new(analysis: &Analysis) -> Self {
        Self {
            fastest: analysis.fastest.clone(),
            slowest: analysis.slowest.clone(),
            matrix: analysis.matrix.clone(),
            view_mode: ViewMode::Ranked,
        }
    }

    fn ranked_lines(stats: &[DigraphStat]) -> Vec<Line<'_>> {
        stats
            .iter()
            .enumerate()
            .map(|(index, stat)| {
                Line::from(format!(
                    "{:>2}. {} -> {}  {:>7.2} wpm  {:>5.1}%  x{}",
                    index + 1,
                    stat.prev_key,
                    stat.key,
                    stat.avg_wpm,
                    stat.accuracy * 100.0,
                    stat.count
                ))
            })
            .collect()
    }

    fn render_ranked(&self, frame: &mut Frame, area: Rect) {
        let [fastest_area, slowest_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(area);

        let fastest = List::new(Self::ranked_lines(&self.fastest))
            .block(ROUNDED_BLOCK.title("Fastest transitions".to_span().bold()));
        frame.render_widget(fastest, fastest_area);

        let slowest = List::new(Self::ranked_lines(&self.slowest))
            .block(ROUNDED_BLOCK.title("Slowest transitions".to_span().bold()));
        frame.render_widget(slowest, slowest_area);
    }

    fn render_matrix(&self, frame: &mut Frame, area: Rect, config: &Config, speed: bool) {
        let theme = &config.settings.theme;
        let title = if speed {
            "Average WPM by transition (prev key x key)"
        } else {
            "Transition counts (prev key x key)"
        };

        let max = if speed {
            self.matrix
                .avg_wpm
                .iter()
                .flatten()
                .fold(0.0_f64, |acc, &cell| acc.max(cell))
        } else {
            self.matrix
                .counts
                .iter()
                .flatten()
                .fold(0.0_f64, |acc, &cell| acc.max(cell as f64))
        };

        let mut header = vec![Span::raw("    ")];
        header.extend(
            self.matrix
                .keys
                .iter()
                .map(|key| format!("{key:>5}").bold()),
        );
        let mut lines = vec![Line::from(header)];

        for (row, prev_key) in self.matrix.prev_keys.iter().enumerate() {
            let mut spans = vec![format!("{prev_key:>3} ").bold()];
            for col in 0..self.matrix.keys.len() {
                let count = self.matrix.counts[row][col];
                if count == 0 {
                    // Unobserved cell: 0 is a no-data sentinel, not a value.
                    spans.push(Span::styled("    .", Style::default().fg(theme.text.dim)));
                    continue;
                }

                let (value, text) = if speed {
                    let wpm = self.matrix.avg_wpm[row][col];
                    (wpm, format!("{wpm:>5.0}"))
                } else {
                    (count as f64, format!("{count:>5}"))
                };

                let mut style = Style::default();
                if max > 0.0
                    && let Some(color) = theme.plot.heat_color(value / max)
                {
                    style = style.bg(color);
                }
                spans.push(Span::styled(text, style));
            }
            lines.push(Line::from(spans));
        }

        let grid = Paragraph::new(lines).block(ROUNDED_BLOCK.title(title.to_span().bold()));
        frame.render_widget(grid, area);
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config) {
        if self.matrix.is_empty() {
            let no_data = Paragraph::new(
                "No transitions recorded.\nEvery event in this log starts its own session.",
            )
            .block(ROUNDED_BLOCK.title("Transitions".to_span().bold()))
            .centered();
            frame.render_widget(no_data, area);
            return;
        }

        match self.view_mode {
            ViewMode::Ranked => self.render_ranked(frame, area),
            ViewMode::CountMatrix => self.render_matrix(frame, area, config, false),
            ViewMode::SpeedMatrix => self.render_matrix(frame, area, config, true),
        }
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::raw("<Tab> ranked/counts/speed | <Left/Right> view"))
    }

    pub fn handle_events(&mut self, event: &Event, _config: &Config) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
            && key.code == KeyCode::Tab
        {
            self.view_mode = self.view_mode.next();
        }

        None
    }
}
