use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::core::focus::Direction;
use crate::core::intent::RemoteKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Drag,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinchStep {
    In,
    Out,
}

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Keys with a navigation meaning (mapped to intents by the core)
    Key(RemoteKey),

    // TUI-local events (handled directly in TUI)
    InputChar(char),
    Backspace,
    /// Left mouse button as a single finger, in terminal cells.
    Pointer(PointerPhase, u16, u16),
    /// Ctrl+scroll stands in for a two-finger pinch.
    Pinch(PinchStep),
    Resize,
    ForceQuit,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, waiting up to `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).ok()? {
        return None;
    }
    map_event(event::read().ok()?)
}

fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => map_key(key_event),
        Event::Mouse(mouse_event) => map_mouse(mouse_event),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // With REPORT_EVENT_TYPES on, releases arrive too; only presses count.
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        // Alt+Left / Alt+Right mirror browser history keys
        (KeyModifiers::ALT, KeyCode::Left) => Some(TuiEvent::Key(RemoteKey::Back)),
        (KeyModifiers::ALT, KeyCode::Right) => Some(TuiEvent::Key(RemoteKey::Forward)),
        (_, KeyCode::Up) => Some(TuiEvent::Key(RemoteKey::Arrow(Direction::Up))),
        (_, KeyCode::Down) => Some(TuiEvent::Key(RemoteKey::Arrow(Direction::Down))),
        (_, KeyCode::Left) => Some(TuiEvent::Key(RemoteKey::Arrow(Direction::Left))),
        (_, KeyCode::Right) => Some(TuiEvent::Key(RemoteKey::Arrow(Direction::Right))),
        (_, KeyCode::Enter) => Some(TuiEvent::Key(RemoteKey::Select)),
        (_, KeyCode::Esc) => Some(TuiEvent::Key(RemoteKey::Back)),
        (_, KeyCode::F(5)) => Some(TuiEvent::Key(RemoteKey::Refresh)),
        (_, KeyCode::Menu) => Some(TuiEvent::Key(RemoteKey::Menu)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        _ => None,
    }
}

fn map_mouse(mouse_event: MouseEvent) -> Option<TuiEvent> {
    let (col, row) = (mouse_event.column, mouse_event.row);
    let pinching = mouse_event.modifiers.contains(KeyModifiers::CONTROL);
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(TuiEvent::Pointer(PointerPhase::Down, col, row)),
        MouseEventKind::Drag(MouseButton::Left) => Some(TuiEvent::Pointer(PointerPhase::Drag, col, row)),
        MouseEventKind::Up(MouseButton::Left) => Some(TuiEvent::Pointer(PointerPhase::Up, col, row)),
        MouseEventKind::ScrollUp if pinching => Some(TuiEvent::Pinch(PinchStep::Out)),
        MouseEventKind::ScrollDown if pinching => Some(TuiEvent::Pinch(PinchStep::In)),
        MouseEventKind::ScrollUp => Some(TuiEvent::Key(RemoteKey::Arrow(Direction::Up))),
        MouseEventKind::ScrollDown => Some(TuiEvent::Key(RemoteKey::Arrow(Direction::Down))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, modifiers: KeyModifiers) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 3,
            row: 7,
            modifiers,
        })
    }

    #[test]
    fn test_arrows_and_select() {
        assert_eq!(
            map_event(key(KeyCode::Left, KeyModifiers::NONE)),
            Some(TuiEvent::Key(RemoteKey::Arrow(Direction::Left)))
        );
        assert_eq!(
            map_event(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(TuiEvent::Key(RemoteKey::Select))
        );
    }

    #[test]
    fn test_history_keys() {
        assert_eq!(map_event(key(KeyCode::Esc, KeyModifiers::NONE)), Some(TuiEvent::Key(RemoteKey::Back)));
        assert_eq!(map_event(key(KeyCode::Left, KeyModifiers::ALT)), Some(TuiEvent::Key(RemoteKey::Back)));
        assert_eq!(map_event(key(KeyCode::Right, KeyModifiers::ALT)), Some(TuiEvent::Key(RemoteKey::Forward)));
    }

    #[test]
    fn test_ctrl_c_force_quits() {
        assert_eq!(map_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(TuiEvent::ForceQuit));
        assert_eq!(map_event(key(KeyCode::Char('c'), KeyModifiers::NONE)), Some(TuiEvent::InputChar('c')));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_event(release), None);
    }

    #[test]
    fn test_left_button_is_a_finger() {
        assert_eq!(
            map_event(mouse(MouseEventKind::Down(MouseButton::Left), KeyModifiers::NONE)),
            Some(TuiEvent::Pointer(PointerPhase::Down, 3, 7))
        );
        assert_eq!(map_event(mouse(MouseEventKind::Down(MouseButton::Right), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_ctrl_scroll_pinches() {
        assert_eq!(
            map_event(mouse(MouseEventKind::ScrollUp, KeyModifiers::CONTROL)),
            Some(TuiEvent::Pinch(PinchStep::Out))
        );
        assert_eq!(
            map_event(mouse(MouseEventKind::ScrollDown, KeyModifiers::NONE)),
            Some(TuiEvent::Key(RemoteKey::Arrow(Direction::Down)))
        );
    }
}
