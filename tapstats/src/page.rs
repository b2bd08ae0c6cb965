use crossterm::event::Event;
use ratatui::{Frame, layout::Rect, text::Line};
use strum::{Display, EnumIter, FromRepr};

pub mod keys;
pub mod keyspeed;
pub mod transitions;
pub mod trigrams;

pub use keys::Keys;
pub use keyspeed::KeySpeed;
pub use transitions::Transitions;
pub use trigrams::Trigrams;

use crate::{analysis::Analysis, app::Message, config::Config};

/// The analysis views, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, FromRepr)]
pub enum View {
    Keys,
    Transitions,
    Trigrams,
    #[strum(serialize = "Key speed")]
    KeySpeed,
}

impl View {
    const COUNT: usize = 4;

    pub fn next(self) -> Self {
        Self::from_repr((self as usize + 1) % Self::COUNT).unwrap_or(Self::Keys)
    }

    pub fn previous(self) -> Self {
        Self::from_repr((self as usize + Self::COUNT - 1) % Self::COUNT).unwrap_or(Self::Keys)
    }
}

macro_rules! make_page_enum {
    ($($t:tt),*) => {
        pub enum Page {
            $(
                $t(Box<$t>),
            )*
        }

        $(
            impl From<$t> for Page {
                fn from(value: $t) -> Page {
                    Page::$t(Box::new(value))
                }
            }
        )*
    };
}

make_page_enum!(Keys, Transitions, Trigrams, KeySpeed);

impl Page {
    /// Builds the page backing a view from the computed analysis.
    pub fn open(view: View, analysis: &Analysis) -> Self {
        match view {
            View::Keys => Keys::new(analysis).into(),
            View::Transitions => Transitions::new(analysis).into(),
            View::Trigrams => Trigrams::new(analysis).into(),
            View::KeySpeed => KeySpeed::new(analysis).into(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config) {
        match self {
            Self::Keys(page) => page.render(frame, area, config),
            Self::Transitions(page) => page.render(frame, area, config),
            Self::Trigrams(page) => page.render(frame, area, config),
            Self::KeySpeed(page) => page.render(frame, area, config),
        }
    }

    pub fn render_top(&mut self, config: &Config) -> Option<Line<'_>> {
        match self {
            Self::Keys(page) => page.render_top(config),
            Self::Transitions(page) => page.render_top(config),
            Self::Trigrams(_) => None,
            Self::KeySpeed(_) => None,
        }
    }

    pub fn handle_events(&mut self, event: &Event, config: &Config) -> Option<Message> {
        match self {
            Self::Keys(page) => page.handle_events(event, config),
            Self::Transitions(page) => page.handle_events(event, config),
            Self::Trigrams(_) => None,
            Self::KeySpeed(_) => None,
        }
    }
}
