use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span, ToSpan},
    widgets::{Axis, Chart, Dataset, GraphType, LegendPosition, Paragraph},
};

use crate::{analysis::Analysis, config::Config, utils::{ROUNDED_BLOCK, center}};

enum Outcome {
    /// No key was requested for this run.
    NoTarget,
    /// The smoother rejected the request; the other views are unaffected.
    Failed(String),
    /// (instance, smoothed wpm) points, ready for a line plot.
    Series(Vec<(f64, f64)>),
}

/// Page: One key's speed history
///
/// Plots the rolling average of the requested key's speed over its press
/// instances, the way the smoother produced it.
pub struct KeySpeed {
    target: Option<String>,
    smoothness: usize,
    outcome: Outcome,
}

impl KeySpeed {
    pub fn new(analysis: &Analysis) -> Self {
        let outcome = match &analysis.series {
            None => Outcome::NoTarget,
            Some(Err(error)) => Outcome::Failed(error.to_string()),
            Some(Ok(points)) => Outcome::Series(
                points
                    .iter()
                    .map(|point| (point.instance as f64, point.wpm))
                    .collect(),
            ),
        };

        Self {
            target: analysis.target_key.clone(),
            smoothness: analysis.smoothness,
            outcome,
        }
    }

    fn render_message(frame: &mut Frame, area: Rect, message: Span) {
        let area = center(area, Constraint::Percentage(80), Constraint::Length(1));
        frame.render_widget(Paragraph::new(Line::from(message)).centered(), area);
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect, config: &Config, data: &[(f64, f64)]) {
        let theme = &config.settings.theme;
        let key = self.target.as_deref().unwrap_or_default();

        let dataset = Dataset::default()
            .name("Smoothed WPM")
            .marker(theme.plot.line_symbol.as_marker())
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.plot.smoothed))
            .data(data);

        let (wpm_min, wpm_max) = data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |acc, (_, y)| {
                (acc.0.min(*y), acc.1.max(*y))
            });
        let y_bounds = if wpm_min.is_finite() && wpm_max.is_finite() {
            [(wpm_min - 5.0).max(0.0), wpm_max + 5.0]
        } else {
            [0.0, 100.0]
        };
        let last_instance = data.last().map_or(1.0, |(x, _)| *x);

        let title = format!(
            "Typing speed for key '{key}' (smoothness={})",
            self.smoothness
        );

        let chart = Chart::new(vec![dataset])
            .block(ROUNDED_BLOCK.title(title.to_span().bold()))
            .x_axis(
                Axis::default()
                    .title("Instance")
                    .style(Style::default().fg(Color::Gray))
                    .labels([
                        Span::raw("1"),
                        Span::raw((last_instance / 2.0).trunc().to_string()),
                        Span::raw(last_instance.trunc().to_string()),
                    ])
                    .bounds([1.0, last_instance]),
            )
            .y_axis(
                Axis::default()
                    .title("WPM")
                    .style(Style::default().fg(Color::Gray))
                    .labels([
                        Span::raw(y_bounds[0].trunc().to_string()),
                        Span::raw(((y_bounds[0] + y_bounds[1]) / 2.0).trunc().to_string()),
                        Span::raw(y_bounds[1].trunc().to_string()),
                    ])
                    .bounds(y_bounds),
            )
            .legend_position(Some(LegendPosition::BottomRight));

        frame.render_widget(chart, area);
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config) {
        let theme = &config.settings.theme;
        match &self.outcome {
            Outcome::NoTarget => Self::render_message(
                frame,
                area,
                Span::styled(
                    "Pass --key to plot a key's speed history",
                    Style::default().fg(theme.text.dim),
                ),
            ),
            Outcome::Failed(message) => Self::render_message(
                frame,
                area,
                Span::styled(message.clone(), Style::default().fg(theme.text.error)),
            ),
            Outcome::Series(data) => self.render_chart(frame, area, config, data),
        }
    }
}
