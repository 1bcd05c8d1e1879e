//! # Actions
//!
//! Everything that can happen to navigation becomes an `Action`.
//! User presses OK? That's `Action::Intent(NavigationIntent::Activate)`.
//! A tile opened a library? That's `Action::Navigate(location)`.
//!
//! `update()` takes the current state and an action, mutates the state, and
//! returns an `Effect` for the host to carry out. The only outside contact is
//! the [`NavigationHost`] capability, which is how focus reaches the screen.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::core::focus::FocusSurface;
use crate::core::gesture::GestureEvent;
use crate::core::intent::{NavigationIntent, intent_for_gesture};
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Intent(NavigationIntent),
    /// A gesture straight from the recognizer.
    Gesture(GestureEvent),
    /// A navigation the host has confirmed (tile opened, link followed).
    Navigate(String),
    /// Pointer selection of a specific element.
    FocusAt(usize),
    Quit,
}

/// What the host should do after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    FocusMoved(usize),
    Activated(usize),
    /// The current location changed; the host should show `location`.
    Navigated(String),
    /// Back or forward had nowhere to go.
    HistoryBoundary,
    /// The screen consumed back/forward itself.
    HandledByScreen,
    OpenMenu,
    OpenSearch,
    Refresh,
}

/// The screen-level capability set `update` talks to.
///
/// `on_back`/`on_forward` let a screen claim those intents (closing a player,
/// paging a carousel); returning `false` falls through to history traversal.
pub trait NavigationHost: FocusSurface {
    fn on_back(&mut self) -> bool {
        false
    }

    fn on_forward(&mut self) -> bool {
        false
    }

    /// Best-effort "nothing further" feedback. Absent hardware is fine.
    fn haptic_pulse(&mut self) {}
}

pub fn update<H: NavigationHost>(app: &mut App, action: Action, host: &mut H) -> Effect {
    match action {
        Action::Quit => Effect::Quit,
        Action::Intent(intent) => resolve_intent(app, intent, host),
        Action::Gesture(event) => {
            app.last_gesture = Some(event);
            if !app.gestures_enabled() {
                debug!("Gesture {:?} ignored in {} mode", event, app.input_mode.label());
                return Effect::None;
            }
            match intent_for_gesture(event) {
                Some(intent) => resolve_intent(app, intent, host),
                None => Effect::None,
            }
        }
        Action::Navigate(location) => {
            if location == app.location() {
                return Effect::None;
            }
            app.history.push(location.clone());
            enter(app, &location);
            Effect::Navigated(location)
        }
        Action::FocusAt(index) => match app.navigator.focus_at(index, host) {
            Some(index) => Effect::FocusMoved(index),
            None => Effect::None,
        },
    }
}

fn resolve_intent<H: NavigationHost>(app: &mut App, intent: NavigationIntent, host: &mut H) -> Effect {
    match intent {
        NavigationIntent::MoveFocus(direction) => match app.navigator.move_focus(direction, host) {
            Some(index) => Effect::FocusMoved(index),
            None => Effect::None,
        },
        NavigationIntent::Activate => match app.navigator.activate(host) {
            Some(index) => Effect::Activated(index),
            None => Effect::None,
        },
        NavigationIntent::Back => {
            if host.on_back() {
                return Effect::HandledByScreen;
            }
            match app.history.back().cloned() {
                Some(location) => {
                    enter(app, &location);
                    Effect::Navigated(location)
                }
                None => {
                    host.haptic_pulse();
                    app.status_message = String::from("Nothing further back");
                    Effect::HistoryBoundary
                }
            }
        }
        NavigationIntent::Forward => {
            if host.on_forward() {
                return Effect::HandledByScreen;
            }
            match app.history.forward().cloned() {
                Some(location) => {
                    enter(app, &location);
                    Effect::Navigated(location)
                }
                None => {
                    host.haptic_pulse();
                    app.status_message = String::from("Nothing further forward");
                    Effect::HistoryBoundary
                }
            }
        }
        NavigationIntent::OpenMenu => Effect::OpenMenu,
        NavigationIntent::OpenSearch => Effect::OpenSearch,
        NavigationIntent::Refresh => Effect::Refresh,
    }
}

/// A different location means a different item set.
fn enter(app: &mut App, location: &str) {
    app.navigator.rebind(location);
    app.status_message = format!("Viewing {location}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::focus::Direction;
    use crate::test_support::{MockSurface, test_app};

    fn navigate(app: &mut App, surface: &mut MockSurface, location: &str) -> Effect {
        update(app, Action::Navigate(location.to_string()), surface)
    }

    #[test]
    fn test_navigate_pushes_and_resets_focus() {
        let mut app = test_app();
        let mut surface = MockSurface::grid(12);
        update(&mut app, Action::Intent(NavigationIntent::MoveFocus(Direction::Down)), &mut surface);
        assert_eq!(app.navigator.focused_index(), 4);

        let effect = navigate(&mut app, &mut surface, "/library/movies");
        assert_eq!(effect, Effect::Navigated("/library/movies".to_string()));
        assert_eq!(app.history.len(), 2);
        assert_eq!(app.navigator.focused_index(), 0);
    }

    #[test]
    fn test_navigate_to_current_location_is_noop() {
        let mut app = test_app();
        let mut surface = MockSurface::grid(1);
        assert_eq!(navigate(&mut app, &mut surface, "/"), Effect::None);
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn test_back_walks_history_when_screen_declines() {
        let mut app = test_app();
        let mut surface = MockSurface::grid(4);
        navigate(&mut app, &mut surface, "/library/movies");

        let effect = update(&mut app, Action::Intent(NavigationIntent::Back), &mut surface);
        assert_eq!(effect, Effect::Navigated("/".to_string()));
        assert_eq!(app.location(), "/");

        let effect = update(&mut app, Action::Intent(NavigationIntent::Forward), &mut surface);
        assert_eq!(effect, Effect::Navigated("/library/movies".to_string()));
    }

    #[test]
    fn test_back_claimed_by_screen_leaves_history_alone() {
        let mut app = test_app();
        let mut surface = MockSurface::grid(4);
        navigate(&mut app, &mut surface, "/player/42");
        surface.handles_back = true;

        let effect = update(&mut app, Action::Intent(NavigationIntent::Back), &mut surface);
        assert_eq!(effect, Effect::HandledByScreen);
        assert_eq!(app.location(), "/player/42");
    }

    #[test]
    fn test_back_at_start_pulses_haptics() {
        let mut app = test_app();
        let mut surface = MockSurface::grid(4);

        let effect = update(&mut app, Action::Intent(NavigationIntent::Back), &mut surface);
        assert_eq!(effect, Effect::HistoryBoundary);
        assert_eq!(surface.haptic_pulses, 1);
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn test_swipe_right_goes_back() {
        let mut app = test_app();
        let mut surface = MockSurface::grid(4);
        navigate(&mut app, &mut surface, "/library/shows");

        let effect = update(&mut app, Action::Gesture(GestureEvent::SwipeRight), &mut surface);
        assert_eq!(effect, Effect::Navigated("/".to_string()));
        assert_eq!(app.last_gesture, Some(GestureEvent::SwipeRight));
    }

    #[test]
    fn test_gestures_ignored_in_directional_mode() {
        let mut app = test_app();
        app.input_mode = crate::core::input_mode::InputMode::Directional;
        let mut surface = MockSurface::grid(4);
        navigate(&mut app, &mut surface, "/library/shows");

        let effect = update(&mut app, Action::Gesture(GestureEvent::SwipeRight), &mut surface);
        assert_eq!(effect, Effect::None);
        assert_eq!(app.location(), "/library/shows");
    }

    #[test]
    fn test_focus_at_then_activate() {
        let mut app = test_app();
        let mut surface = MockSurface::grid(8);

        assert_eq!(update(&mut app, Action::FocusAt(6), &mut surface), Effect::FocusMoved(6));
        assert_eq!(
            update(&mut app, Action::Intent(NavigationIntent::Activate), &mut surface),
            Effect::Activated(6)
        );
        assert_eq!(surface.activated, vec![6]);
        assert_eq!(update(&mut app, Action::FocusAt(99), &mut surface), Effect::None);
    }

    #[test]
    fn test_menu_search_refresh_pass_through() {
        let mut app = test_app();
        let mut surface = MockSurface::grid(1);
        assert_eq!(update(&mut app, Action::Gesture(GestureEvent::LongPress), &mut surface), Effect::OpenMenu);
        assert_eq!(update(&mut app, Action::Gesture(GestureEvent::SwipeUp), &mut surface), Effect::OpenSearch);
        assert_eq!(update(&mut app, Action::Intent(NavigationIntent::Refresh), &mut surface), Effect::Refresh);
        assert_eq!(update(&mut app, Action::Quit, &mut surface), Effect::Quit);
    }
}
