//! # Navigation Intents
//!
//! Both input paths collapse into one small vocabulary before anything acts:
//!
//! ```text
//! keys / D-pad ──► intent_for_key ─────┐
//!                                      ├──► NavigationIntent ──► update()
//! touch ──► GestureRecognizer ──► intent_for_gesture ─┘
//! ```
//!
//! Pinch gestures have no intent; hosts receive them through
//! [`GestureHandler`](crate::core::gesture::GestureHandler) directly.

use crate::core::focus::Direction;
use crate::core::gesture::GestureEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    Back,
    Forward,
    OpenMenu,
    OpenSearch,
    Refresh,
    MoveFocus(Direction),
    Activate,
}

/// Discrete keys from a keyboard or a TV remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteKey {
    Arrow(Direction),
    /// Enter, OK, Select.
    Select,
    /// Escape or the remote's Back button.
    Back,
    /// Browser/remote forward button.
    Forward,
    /// Remote menu / context-menu key.
    Menu,
    Search,
    /// F5 or the remote's reload key.
    Refresh,
}

/// Map a key to an intent.
///
/// While focus sits in a text-entry element, Back belongs to the text field
/// (clearing, closing the keyboard) and arrows move the caret, so only Select
/// and the dedicated remote keys pass through.
pub fn intent_for_key(key: RemoteKey, in_text_entry: bool) -> Option<NavigationIntent> {
    match key {
        RemoteKey::Arrow(_) | RemoteKey::Back if in_text_entry => None,
        RemoteKey::Arrow(direction) => Some(NavigationIntent::MoveFocus(direction)),
        RemoteKey::Select => Some(NavigationIntent::Activate),
        RemoteKey::Back => Some(NavigationIntent::Back),
        RemoteKey::Forward => Some(NavigationIntent::Forward),
        RemoteKey::Menu => Some(NavigationIntent::OpenMenu),
        RemoteKey::Search => Some(NavigationIntent::OpenSearch),
        RemoteKey::Refresh => Some(NavigationIntent::Refresh),
    }
}

/// Default gesture bindings: horizontal swipes walk history the way a page
/// follows the finger, pull-down refreshes, swipe-up opens search.
pub fn intent_for_gesture(event: GestureEvent) -> Option<NavigationIntent> {
    match event {
        GestureEvent::SwipeRight => Some(NavigationIntent::Back),
        GestureEvent::SwipeLeft => Some(NavigationIntent::Forward),
        GestureEvent::SwipeDown => Some(NavigationIntent::Refresh),
        GestureEvent::SwipeUp => Some(NavigationIntent::OpenSearch),
        GestureEvent::Tap => Some(NavigationIntent::Activate),
        GestureEvent::LongPress => Some(NavigationIntent::OpenMenu),
        GestureEvent::DoubleTap | GestureEvent::PinchIn | GestureEvent::PinchOut => None,
    }
}
