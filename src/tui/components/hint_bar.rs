//! # HintBar Component
//!
//! One-line cheat sheet for the active input mode. Shown at startup and on
//! `?`, hidden again after [`HINT_DURATION_MS`]. The hide timer is a deadline
//! the event loop folds into its poll timeout, like the gesture timers.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::core::input_mode::InputMode;
use crate::tui::component::Component;

pub const HINT_DURATION_MS: u64 = 4000;

const TOUCH_HINTS: &str =
    " drag: swipe  click: tap  double-click: reset zoom  hold: menu  ctrl+scroll: pinch  ?: hints  q: quit ";
const REMOTE_HINTS: &str =
    " ←↑↓→: move  enter: select  esc: back  alt+→: forward  /: search  F5: refresh  q: quit ";

pub struct HintBar {
    pub input_mode: InputMode,
    visible_until: Option<u64>,
}

impl HintBar {
    pub fn new(input_mode: InputMode) -> Self {
        Self {
            input_mode,
            visible_until: None,
        }
    }

    pub fn show(&mut self, now_ms: u64) {
        self.visible_until = Some(now_ms + HINT_DURATION_MS);
    }

    pub fn is_visible(&self) -> bool {
        self.visible_until.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.visible_until
    }

    /// Hide once the deadline passes. Returns true if the bar just went away.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.visible_until {
            Some(until) if now_ms >= until => {
                self.visible_until = None;
                true
            }
            _ => false,
        }
    }

    fn text(&self) -> &'static str {
        match self.input_mode {
            InputMode::Touch => TOUCH_HINTS,
            InputMode::Directional => REMOTE_HINTS,
        }
    }
}

impl Component for HintBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hints = Paragraph::new(self.text()).style(Style::default().fg(Color::Black).bg(Color::Gray));
        frame.render_widget(hints, area);
    }
}
