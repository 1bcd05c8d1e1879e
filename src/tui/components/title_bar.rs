//! # TitleBar Component
//!
//! Top status bar: where you are, how input is being read, what happened last.
//!
//! ## Layout
//!
//! ```text
//! Glide ◀ · Movies [touch] | swipe left | Viewing /library/movies
//! ```
//!
//! The arrows show whether history has somewhere to go back or forward. The
//! gesture and status segments are dropped when empty, so the most important
//! part stays visible on narrow terminals.
//!
//! Purely presentational: it receives everything as props and holds no state.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar {
    /// Human-readable name of the current location
    pub heading: String,
    /// Input mode label ("touch" or "remote")
    pub mode_label: String,
    /// Most recent gesture, if any
    pub last_gesture: Option<String>,
    pub status_message: String,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

impl TitleBar {
    pub fn new(heading: String, mode_label: String, status_message: String) -> Self {
        Self {
            heading,
            mode_label,
            last_gesture: None,
            status_message,
            can_go_back: false,
            can_go_forward: false,
        }
    }

    fn title_text(&self) -> String {
        let back = if self.can_go_back { '◀' } else { '·' };
        let forward = if self.can_go_forward { '▶' } else { '·' };
        let mut text = format!(
            "Glide {back} {forward} {} [{}]",
            self.heading, self.mode_label
        );
        if let Some(gesture) = &self.last_gesture {
            text.push_str(&format!(" | {gesture}"));
        }
        if !self.status_message.is_empty() {
            text.push_str(&format!(" | {}", self.status_message));
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.title_text()), area);
    }
}
