//! # Application State
//!
//! Core navigation state for one client process. Domain logic only, no
//! terminal types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── history: HistoryStack<String>   // visited locations, process-wide
//! ├── navigator: FocusNavigator       // focused index on the current screen
//! ├── recognizer: GestureRecognizer   // in-flight touch sequence + tap timer
//! ├── input_mode: InputMode           // decided once at startup
//! ├── status_message: String          // status bar text
//! └── last_gesture: Option<GestureEvent>
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::focus::FocusNavigator;
use crate::core::gesture::{GestureEvent, GestureRecognizer};
use crate::core::history::HistoryStack;
use crate::core::input_mode::InputMode;

pub const HOME_LOCATION: &str = "/";

#[derive(Debug)]
pub struct App {
    pub history: HistoryStack<String>,
    pub navigator: FocusNavigator,
    pub recognizer: GestureRecognizer,
    pub input_mode: InputMode,
    pub status_message: String,
    /// Most recent recognized gesture, resolved or not (shown in the title bar).
    pub last_gesture: Option<GestureEvent>,
}

impl App {
    pub fn new(config: &ResolvedConfig, input_mode: InputMode) -> Self {
        let mut navigator = FocusNavigator::new(config.policy);
        navigator.set_grid_alignment(input_mode.profile().grid_alignment);
        navigator.rebind(HOME_LOCATION);

        Self {
            history: HistoryStack::new(HOME_LOCATION.to_string(), config.history_capacity),
            navigator,
            recognizer: GestureRecognizer::new(config.gestures),
            input_mode,
            status_message: String::from("Welcome to Glide!"),
            last_gesture: None,
        }
    }

    /// Location under the history cursor.
    pub fn location(&self) -> &str {
        self.history.current()
    }

    pub fn gestures_enabled(&self) -> bool {
        self.input_mode.profile().gestures_enabled
    }
}
