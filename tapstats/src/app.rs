use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    style::Stylize,
    text::{Line, Span, ToLine},
    widgets::Padding,
};
use strum::IntoEnumIterator;

use crate::analysis::Analysis;
use crate::config::Config;
use crate::page::{Page, View};
use crate::utils::{KeyEventHelper, ROUNDED_BLOCK};

/// An app message
pub enum Message {
    /// Switch to a specific view
    Show(View),
    /// Quit the application
    Quit,
}

/// The app itself
pub struct App {
    view: View,
    page: Page,
    config: Config,
    analysis: Analysis,
}

impl App {
    /// Creates a new `App` showing the per-key view
    pub fn new(config: Config, analysis: Analysis) -> Self {
        let view = View::Keys;
        let page = Page::open(view, &analysis);
        Self {
            view,
            page,
            config,
            analysis,
        }
    }

    /// Runs the app
    pub fn run(&mut self) -> std::io::Result<()> {
        let mut terminal = ratatui::init();

        loop {
            let event = event::poll(Duration::from_millis(50))?
                .then(event::read)
                .transpose()?;
            if let Some(message) = self.handle_events(event) {
                match message {
                    Message::Show(view) => {
                        self.view = view;
                        self.page = Page::open(view, &self.analysis);
                    }
                    Message::Quit => break,
                }
            }
            terminal.draw(|frame| self.draw(frame))?;
        }

        ratatui::restore();

        Ok(())
    }

    /// Draws the next frame
    fn draw(&mut self, frame: &mut Frame) {
        let mut block = ROUNDED_BLOCK
            .padding(Padding::new(1, 1, 0, 0))
            .title_top("TAPSTATS".to_line().bold().centered())
            .title_top("<CTRL-Q> to exit".to_line().right_aligned())
            .title_bottom(self.footer().left_aligned())
            .title_bottom(self.tabs().right_aligned());

        if let Some(top_msg) = self.page.render_top(&self.config) {
            block = block.title_top(top_msg);
        }

        let area = frame.area();
        let content = block.inner(area);

        frame.render_widget(block, area);

        self.page.render(frame, content, &self.config);
    }

    fn footer(&self) -> Line<'static> {
        Line::from(format!(
            "{} | {} events | {} skipped",
            self.analysis.player, self.analysis.events, self.analysis.skipped
        ))
    }

    fn tabs(&self) -> Line<'static> {
        let highlight = self.config.settings.theme.text.highlight;
        let spans: Vec<Span> = View::iter()
            .enumerate()
            .map(|(index, view)| {
                let label = format!(" [{}] {} ", index + 1, view);
                if view == self.view {
                    label.bold().fg(highlight)
                } else {
                    Span::from(label)
                }
            })
            .collect();
        Line::from(spans)
    }

    /// Global event handler
    fn handle_events(&mut self, event_opt: Option<Event>) -> Option<Message> {
        event_opt.and_then(|event| {
            self.page
                .handle_events(&event, &self.config)
                .or_else(|| match event {
                    Event::Key(key) => self.handle_key_event(key),
                    _ => None,
                })
        })
    }

    /// Global key events
    fn handle_key_event(&self, key: KeyEvent) -> Option<Message> {
        if !key.is_press() {
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => Some(Message::Quit),
            (KeyCode::Left, _) => Some(Message::Show(self.view.previous())),
            (KeyCode::Right, _) => Some(Message::Show(self.view.next())),
            (KeyCode::Char(number @ '1'..='4'), _) => {
                View::from_repr((number as u8 - b'1') as usize).map(Message::Show)
            }
            _ => None,
        }
    }
}
