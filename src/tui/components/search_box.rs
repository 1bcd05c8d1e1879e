//! # SearchBox Component
//!
//! Filter field opened by the search intent (swipe up, `/`). While it is open
//! focus sits in a text-entry element, so Back clears the field instead of
//! walking history and arrows stay with the field.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::intent::RemoteKey;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Query text changed; the grid should refilter.
    Changed(String),
    /// Enter: keep the filter, hand focus back to the grid.
    Submit,
    /// Back: drop the filter and close.
    Dismiss,
}

#[derive(Debug, Default)]
pub struct SearchBox {
    pub query: String,
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Search (Enter to keep, Esc to clear)");
        let input = Paragraph::new(self.query.as_str())
            .block(block)
            .style(Style::default().fg(Color::Green));
        frame.render_widget(input, area);

        let x = area.x + 1 + self.query.width() as u16;
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.query.push(*c);
                Some(SearchEvent::Changed(self.query.clone()))
            }
            TuiEvent::Backspace => self
                .query
                .pop()
                .map(|_| SearchEvent::Changed(self.query.clone())),
            TuiEvent::Key(RemoteKey::Select) => Some(SearchEvent::Submit),
            TuiEvent::Key(RemoteKey::Back) => Some(SearchEvent::Dismiss),
            _ => None,
        }
    }
}
