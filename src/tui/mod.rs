//! # TUI Adapter
//!
//! The ratatui-specific layer and the owning UI for the navigation core. It
//! renders the demo catalog, turns terminal input into core actions and
//! carries out the effects `update` returns.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Input Paths
//!
//! ```text
//! keys ──► RemoteKey ──► intent_for_key ───────────────┐
//!                                                       ├─► update() ─► Effect
//! mouse ─► TouchSample ─► GestureRecognizer ─► Gesture ┘
//!                                      └─► GestureHandler (pinch, double tap)
//! ```
//!
//! The left mouse button plays one finger: cells become pixels at
//! [`CELL_WIDTH_PX`] × [`CELL_HEIGHT_PX`]. Ctrl+scroll synthesizes a
//! two-finger pinch step.
//!
//! ## Redraw Strategy
//!
//! The loop sleeps until the next input or the next deadline, whichever comes
//! first. Deadlines come from the gesture recognizer (pending tap, long-press)
//! and the hint bar. Idle, it wakes every 500ms and only redraws when
//! something changed.

mod catalog;
mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::style::Print;

use crate::core::action::{Action, Effect, update};
use crate::core::config::{DEFAULT_COLUMNS, MAX_COLUMNS, ResolvedConfig};
use crate::core::focus::{FocusNavigator, NavigationPolicy};
use crate::core::gesture::{GestureEvent, GestureHandler, GestureRecognizer, TouchSample};
use crate::core::input_mode::InputMode;
use crate::core::intent::{RemoteKey, intent_for_key};
use crate::core::state::App;
use crate::tui::catalog::Catalog;
use crate::tui::component::EventHandler;
use crate::tui::components::{HintBar, LibraryGridState, SearchBox, SearchEvent};
use crate::tui::event::{PinchStep, PointerPhase, TuiEvent, poll_event_immediate, poll_event_timeout};

/// Pixel size assumed for one terminal cell when the mouse stands in for a finger.
pub const CELL_WIDTH_PX: u32 = 8;
pub const CELL_HEIGHT_PX: u32 = 16;

const IDLE_POLL_MS: u64 = 500;
/// Finger distance at the start of a synthesized pinch.
const PINCH_BASE_PX: f32 = 100.0;
/// How far past the recognizer's threshold a synthesized pinch travels.
const PINCH_MARGIN_PX: f32 = 10.0;

/// TUI-specific presentation state (not part of core navigation state)
pub struct TuiState {
    pub grid: LibraryGridState,
    /// Open search field (None = hidden)
    pub search: Option<SearchBox>,
    /// Filter applied to the grid; survives closing the field with Enter.
    pub filter: String,
    pub hints: HintBar,
    /// Heading of the current location
    pub heading: String,
    /// Grid width a double tap returns to
    pub default_columns: usize,
}

impl TuiState {
    pub fn new(app: &App, default_columns: usize) -> Self {
        let profile = app.input_mode.profile();
        Self {
            grid: LibraryGridState::new(
                app.navigator.columns().unwrap_or(default_columns),
                profile.focus_ring_visible,
            ),
            search: None,
            filter: String::new(),
            hints: HintBar::new(app.input_mode),
            heading: String::new(),
            default_columns,
        }
    }

    /// Load `location`'s tiles under the current filter.
    pub fn show_location(&mut self, catalog: &Catalog, location: &str) {
        self.grid.set_tiles(catalog.tiles_for(location, &self.filter));
        self.heading = catalog.heading(location);
    }

    /// Mirror the navigator's grid width into the layout.
    pub fn sync(&mut self, app: &App) {
        self.grid.columns = app.navigator.columns().unwrap_or(self.default_columns);
    }
}

/// Pinch and double tap retune the grid width.
struct GridZoom<'a> {
    navigator: &'a mut FocusNavigator,
    default_columns: usize,
}

impl GestureHandler for GridZoom<'_> {
    fn on_pinch_in(&mut self) {
        if let Some(columns) = self.navigator.columns() {
            self.navigator.set_columns((columns + 1).min(MAX_COLUMNS));
        }
    }

    fn on_pinch_out(&mut self) {
        if let Some(columns) = self.navigator.columns() {
            self.navigator.set_columns(columns.saturating_sub(1).max(1));
        }
    }

    fn on_double_tap(&mut self) {
        self.navigator.set_columns(self.default_columns);
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol makes Esc arrive without the escape-sequence
        // delay; terminals that don't support it ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse capture, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, DisableMouseCapture);
    }
}

/// Milliseconds since the loop started; the recognizer's time base.
struct Clock(Instant);

impl Clock {
    fn now_ms(&self) -> u64 {
        self.0.elapsed().as_millis() as u64
    }
}

pub fn run(config: ResolvedConfig, input_mode: InputMode) -> std::io::Result<()> {
    let catalog = Catalog::demo();
    let mut app = App::new(&config, input_mode);
    let default_columns = match config.policy {
        NavigationPolicy::Grid { columns } => columns,
        NavigationPolicy::Cycle => DEFAULT_COLUMNS,
    };
    let mut tui = TuiState::new(&app, default_columns);
    let clock = Clock(Instant::now());

    let home = app.location().to_string();
    enter_location(&mut app, &mut tui, &catalog, &home);
    tui.hints.show(clock.now_ms());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Mouse capture unavailable: {e}"));

    let mut needs_redraw = true; // Force first frame

    loop {
        tui.sync(&app);

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        if tui.grid.take_bell() {
            // Terminals have no haptics; the bell is the closest pulse.
            let _ = execute!(stdout(), Print('\x07'));
        }

        let first_event = poll_event_timeout(poll_timeout(&app, &tui, clock.now_ms()));

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, &catalog, event, clock.now_ms()) {
                should_quit = true;
                break;
            }
        }
        if should_quit {
            break;
        }

        // A pending tap or long-press fires with no input at all.
        let now = clock.now_ms();
        let (fired, quit) = fire_timers(&mut app, &mut tui, &catalog, now);
        if tui.hints.tick(now) || fired {
            needs_redraw = true;
        }
        if quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Sleep until the nearest deadline, capped at the idle interval.
fn poll_timeout(app: &App, tui: &TuiState, now: u64) -> Duration {
    let deadline = [app.recognizer.next_deadline(), tui.hints.deadline()]
        .into_iter()
        .flatten()
        .min();
    let wait = deadline.map_or(IDLE_POLL_MS, |d| d.saturating_sub(now).min(IDLE_POLL_MS));
    Duration::from_millis(wait)
}

/// Fire elapsed recognizer deadlines. Returns (anything fired, quit requested).
fn fire_timers(app: &mut App, tui: &mut TuiState, catalog: &Catalog, now: u64) -> (bool, bool) {
    let mut fired = false;
    let mut quit = false;
    while let Some(gesture) = app.recognizer.poll(now) {
        fired = true;
        quit |= on_gesture(app, tui, catalog, gesture);
    }
    (fired, quit)
}

/// Route one terminal event. Returns true when the app should quit.
fn handle_event(app: &mut App, tui: &mut TuiState, catalog: &Catalog, event: TuiEvent, now: u64) -> bool {
    match event {
        // Resize just needs a redraw (already flagged by the caller)
        TuiEvent::Resize => false,
        // ForceQuit (Ctrl+C) always quits, search open or not
        TuiEvent::ForceQuit => dispatch(app, tui, catalog, Action::Quit),
        TuiEvent::Pointer(phase, col, row) => handle_pointer(app, tui, catalog, phase, col, row, now),
        TuiEvent::Pinch(step) => {
            let mut quit = false;
            for gesture in synthesize_pinch(&mut app.recognizer, step, now) {
                quit |= on_gesture(app, tui, catalog, gesture);
            }
            quit
        }
        // The search field owns the keyboard while it is open
        event if tui.search.is_some() => handle_search(app, tui, catalog, &event),
        TuiEvent::Key(key) => handle_key(app, tui, catalog, key),
        TuiEvent::InputChar('q') => dispatch(app, tui, catalog, Action::Quit),
        TuiEvent::InputChar('/') => handle_key(app, tui, catalog, RemoteKey::Search),
        TuiEvent::InputChar('m') => handle_key(app, tui, catalog, RemoteKey::Menu),
        TuiEvent::InputChar('?') => {
            tui.hints.show(now);
            false
        }
        TuiEvent::InputChar(_) | TuiEvent::Backspace => false,
    }
}

fn handle_key(app: &mut App, tui: &mut TuiState, catalog: &Catalog, key: RemoteKey) -> bool {
    if matches!(key, RemoteKey::Arrow(_)) {
        tui.grid.show_focus = true;
    }
    match intent_for_key(key, false) {
        Some(intent) => dispatch(app, tui, catalog, Action::Intent(intent)),
        None => false,
    }
}

fn handle_search(app: &mut App, tui: &mut TuiState, catalog: &Catalog, event: &TuiEvent) -> bool {
    let Some(search) = tui.search.as_mut() else {
        return false;
    };
    match search.handle_event(event) {
        Some(SearchEvent::Changed(query)) => {
            tui.filter = query;
            refilter(app, tui, catalog);
            false
        }
        Some(SearchEvent::Submit) => {
            tui.search = None;
            if !tui.filter.is_empty() {
                app.status_message = format!("Filtered by \"{}\"", tui.filter);
            }
            false
        }
        Some(SearchEvent::Dismiss) => {
            tui.search = None;
            tui.filter.clear();
            refilter(app, tui, catalog);
            false
        }
        // Keys the field doesn't use still reach the core as text-entry keys.
        None => match event {
            TuiEvent::Key(key) => match intent_for_key(*key, true) {
                Some(intent) => dispatch(app, tui, catalog, Action::Intent(intent)),
                None => false,
            },
            _ => false,
        },
    }
}

fn touch_sample(col: u16, row: u16, now: u64) -> TouchSample {
    TouchSample::new(
        (col as u32 * CELL_WIDTH_PX) as f32,
        (row as u32 * CELL_HEIGHT_PX) as f32,
        now,
    )
}

fn handle_pointer(
    app: &mut App,
    tui: &mut TuiState,
    catalog: &Catalog,
    phase: PointerPhase,
    col: u16,
    row: u16,
    now: u64,
) -> bool {
    let sample = [touch_sample(col, row, now)];
    let gesture = match phase {
        PointerPhase::Down => {
            // A tap activates whatever is focused, so focus follows the finger.
            if let Some(index) = tui.grid.hit_test(col, row) {
                update(app, Action::FocusAt(index), &mut tui.grid);
            }
            app.recognizer.on_touch_start(&sample)
        }
        PointerPhase::Drag => app.recognizer.on_touch_move(&sample),
        PointerPhase::Up => app.recognizer.on_touch_end(now),
    };
    match gesture {
        Some(gesture) => on_gesture(app, tui, catalog, gesture),
        None => false,
    }
}

/// Two fingers landing `from` apart and moving to `to` apart in one step.
fn synthesize_pinch(recognizer: &mut GestureRecognizer, step: PinchStep, now: u64) -> Vec<GestureEvent> {
    let spread = recognizer.config().pinch_threshold_px + PINCH_MARGIN_PX;
    let (from, to) = match step {
        PinchStep::Out => (PINCH_BASE_PX, PINCH_BASE_PX + spread),
        PinchStep::In => (PINCH_BASE_PX + spread, PINCH_BASE_PX),
    };
    let fingers = |distance: f32| [TouchSample::new(0.0, 0.0, now), TouchSample::new(distance, 0.0, now)];

    // Starting a sequence may flush a tap that was still pending.
    let mut gestures: Vec<GestureEvent> = recognizer.on_touch_start(&fingers(from)).into_iter().collect();
    gestures.extend(recognizer.on_touch_move(&fingers(to)));
    recognizer.on_touch_cancel();
    gestures
}

fn on_gesture(app: &mut App, tui: &mut TuiState, catalog: &Catalog, gesture: GestureEvent) -> bool {
    debug!("Recognized {}", gesture.label());
    if app.gestures_enabled() {
        let before = app.navigator.columns();
        gesture.dispatch(&mut GridZoom {
            navigator: &mut app.navigator,
            default_columns: tui.default_columns,
        });
        if app.navigator.columns() != before {
            tui.sync(app);
            // Keep the focused tile in view under the new width.
            sync_focus(app, tui);
            app.status_message = format!("{} columns", tui.grid.columns);
        }
    }
    dispatch(app, tui, catalog, Action::Gesture(gesture))
}

fn dispatch(app: &mut App, tui: &mut TuiState, catalog: &Catalog, action: Action) -> bool {
    let effect = update(app, action, &mut tui.grid);
    apply_effect(app, tui, catalog, effect)
}

/// Carry out what `update` asked for. Returns true on quit.
fn apply_effect(app: &mut App, tui: &mut TuiState, catalog: &Catalog, effect: Effect) -> bool {
    match effect {
        Effect::Quit => return true,
        Effect::Activated(index) => {
            if let Some(location) = tui.grid.opened.take() {
                return dispatch(app, tui, catalog, Action::Navigate(location));
            }
            if let Some(title) = &tui.grid.player {
                info!("Playing tile {index}: {title}");
                app.status_message = format!("Playing {title}");
            }
        }
        Effect::Navigated(location) => enter_location(app, tui, catalog, &location),
        Effect::HandledByScreen => app.status_message = String::from("Playback stopped"),
        Effect::Refresh => {
            refilter(app, tui, catalog);
            app.status_message = format!("Refreshed {}", tui.heading);
        }
        Effect::OpenSearch => {
            if tui.search.is_none() {
                let mut search = SearchBox::new();
                search.query = tui.filter.clone();
                tui.search = Some(search);
            }
        }
        Effect::OpenMenu => {
            app.status_message = format!("Options for {}", tui.grid.focused_label());
        }
        Effect::FocusMoved(_) | Effect::HistoryBoundary | Effect::None => {}
    }
    false
}

/// Item-set identity: the same location under a different filter is a
/// different set of tiles.
fn item_set_identity(location: &str, filter: &str) -> String {
    if filter.is_empty() {
        location.to_string()
    } else {
        format!("{location}?q={filter}")
    }
}

/// Show a location the core just entered. Filters and overlays don't carry over.
fn enter_location(app: &mut App, tui: &mut TuiState, catalog: &Catalog, location: &str) {
    tui.search = None;
    tui.filter.clear();
    tui.grid.player = None;
    tui.show_location(catalog, location);
    sync_focus(app, tui);
}

/// Reload the current location under the current filter.
fn refilter(app: &mut App, tui: &mut TuiState, catalog: &Catalog) {
    let location = app.location().to_string();
    tui.show_location(catalog, &location);
    app.navigator.rebind(&item_set_identity(&location, &tui.filter));
    sync_focus(app, tui);
}

/// Point the grid's focus at the navigator's index.
fn sync_focus(app: &mut App, tui: &mut TuiState) {
    let index = app.navigator.focused_index();
    update(app, Action::FocusAt(index), &mut tui.grid);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::focus::Direction;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    struct Harness {
        app: App,
        tui: TuiState,
        catalog: Catalog,
    }

    impl Harness {
        fn new(app: App) -> Self {
            let catalog = Catalog::demo();
            let mut app = app;
            let mut tui = TuiState::new(&app, 4);
            enter_location(&mut app, &mut tui, &catalog, "/");
            Self { app, tui, catalog }
        }

        fn send(&mut self, event: TuiEvent, now: u64) -> bool {
            handle_event(&mut self.app, &mut self.tui, &self.catalog, event, now)
        }

        fn key(&mut self, key: RemoteKey) -> bool {
            self.send(TuiEvent::Key(key), 0)
        }

        fn draw(&mut self) {
            let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
            self.tui.sync(&self.app);
            terminal.draw(|f| ui::draw_ui(f, &self.app, &mut self.tui)).unwrap();
        }
    }

    #[test]
    fn test_select_opens_library_and_escape_returns() {
        let mut h = Harness::new(test_app());
        h.key(RemoteKey::Select);
        assert_eq!(h.app.location(), "/library/movies");
        assert_eq!(h.tui.heading, "Movies");
        assert_eq!(h.tui.grid.tiles.len(), 22);

        h.key(RemoteKey::Arrow(Direction::Right));
        assert_eq!(h.tui.grid.focused_id, Some((1 << 16) | 1));
        assert!(h.tui.grid.show_focus);

        h.key(RemoteKey::Back);
        assert_eq!(h.app.location(), "/");
        assert_eq!(h.tui.heading, "Home");
        assert_eq!(h.app.navigator.focused_index(), 0);
    }

    #[test]
    fn test_back_at_home_rings_bell() {
        let mut h = Harness::new(test_app());
        h.key(RemoteKey::Back);
        assert!(h.tui.grid.take_bell());
        assert_eq!(h.app.status_message, "Nothing further back");
    }

    #[test]
    fn test_media_plays_and_back_stops_it() {
        let mut h = Harness::new(test_app());
        h.key(RemoteKey::Select);
        h.key(RemoteKey::Select);
        assert_eq!(h.tui.grid.player.as_deref(), Some("Northern Lights"));
        assert_eq!(h.app.status_message, "Playing Northern Lights");

        h.key(RemoteKey::Back);
        assert!(h.tui.grid.player.is_none());
        assert_eq!(h.app.location(), "/library/movies");
    }

    #[test]
    fn test_search_filters_and_dismiss_restores() {
        let mut h = Harness::new(test_app());
        h.key(RemoteKey::Select);
        h.send(TuiEvent::InputChar('/'), 0);
        assert!(h.tui.search.is_some());

        for c in "north".chars() {
            h.send(TuiEvent::InputChar(c), 0);
        }
        assert_eq!(h.tui.grid.tiles.len(), 1);
        assert_eq!(h.tui.grid.focused_id, Some(1 << 16));

        // Arrows belong to the field; 'q' is text, not quit.
        assert!(!h.send(TuiEvent::InputChar('q'), 0));
        h.send(TuiEvent::Backspace, 0);

        h.key(RemoteKey::Back);
        assert!(h.tui.search.is_none());
        assert_eq!(h.tui.grid.tiles.len(), 22);
        assert_eq!(h.app.location(), "/library/movies");
    }

    #[test]
    fn test_search_submit_keeps_filter() {
        let mut h = Harness::new(test_app());
        h.send(TuiEvent::InputChar('/'), 0);
        h.send(TuiEvent::InputChar('m'), 0);
        h.key(RemoteKey::Select);
        assert!(h.tui.search.is_none());
        assert_eq!(h.tui.filter, "m");
        assert_eq!(h.app.status_message, "Filtered by \"m\"");
        assert!(h.tui.grid.tiles.iter().all(|t| t.title.to_lowercase().contains('m')));
    }

    #[test]
    fn test_pinch_changes_columns_and_double_tap_resets() {
        let mut h = Harness::new(test_app());
        h.send(TuiEvent::Pinch(PinchStep::In), 0);
        assert_eq!(h.app.navigator.columns(), Some(5));
        assert_eq!(h.tui.grid.columns, 5);

        h.send(TuiEvent::Pinch(PinchStep::Out), 10);
        h.send(TuiEvent::Pinch(PinchStep::Out), 20);
        assert_eq!(h.app.navigator.columns(), Some(3));

        on_gesture(&mut h.app, &mut h.tui, &h.catalog, GestureEvent::DoubleTap);
        assert_eq!(h.app.navigator.columns(), Some(4));
        assert_eq!(h.app.last_gesture, Some(GestureEvent::DoubleTap));
    }

    #[test]
    fn test_pinch_ignored_in_remote_mode() {
        let app = App::new(&crate::test_support::test_config(), InputMode::Directional);
        let mut h = Harness::new(app);
        h.send(TuiEvent::Pinch(PinchStep::In), 0);
        assert_eq!(h.app.navigator.columns(), Some(4));
    }

    #[test]
    fn test_click_focuses_tile_and_delayed_tap_opens_it() {
        let mut h = Harness::new(test_app());
        h.draw();

        // Grid inner area starts at (1, 2); tiles are 24 cells wide.
        h.send(TuiEvent::Pointer(PointerPhase::Down, 30, 3), 1_000);
        assert_eq!(h.app.navigator.focused_index(), 1);
        h.send(TuiEvent::Pointer(PointerPhase::Up, 30, 3), 1_050);
        assert_eq!(h.app.location(), "/");

        let (fired, quit) = fire_timers(&mut h.app, &mut h.tui, &h.catalog, 1_349);
        assert!(!fired && !quit);
        let (fired, _) = fire_timers(&mut h.app, &mut h.tui, &h.catalog, 1_350);
        assert!(fired);
        assert_eq!(h.app.location(), "/library/shows");
    }

    #[test]
    fn test_drag_right_swipes_back() {
        let mut h = Harness::new(test_app());
        h.key(RemoteKey::Select);

        h.send(TuiEvent::Pointer(PointerPhase::Down, 10, 10), 0);
        h.send(TuiEvent::Pointer(PointerPhase::Drag, 30, 10), 50);
        h.send(TuiEvent::Pointer(PointerPhase::Up, 30, 10), 60);
        assert_eq!(h.app.location(), "/");
        assert_eq!(h.app.last_gesture, Some(GestureEvent::SwipeRight));
    }

    #[test]
    fn test_quit_keys() {
        let mut h = Harness::new(test_app());
        assert!(h.send(TuiEvent::InputChar('q'), 0));
        assert!(h.send(TuiEvent::ForceQuit, 0));
    }

    #[test]
    fn test_poll_timeout_tracks_deadlines() {
        let mut h = Harness::new(test_app());
        assert_eq!(poll_timeout(&h.app, &h.tui, 0), Duration::from_millis(IDLE_POLL_MS));

        h.send(TuiEvent::Pointer(PointerPhase::Down, 0, 0), 100);
        h.send(TuiEvent::Pointer(PointerPhase::Up, 0, 0), 120);
        assert_eq!(poll_timeout(&h.app, &h.tui, 200), Duration::from_millis(220));
        assert_eq!(poll_timeout(&h.app, &h.tui, 900), Duration::ZERO);
    }

    #[test]
    fn test_synthesized_pinch_steps() {
        let mut recognizer = GestureRecognizer::default();
        assert_eq!(synthesize_pinch(&mut recognizer, PinchStep::Out, 0), vec![GestureEvent::PinchOut]);
        assert_eq!(synthesize_pinch(&mut recognizer, PinchStep::In, 5), vec![GestureEvent::PinchIn]);
        assert!(!recognizer.is_tracking());
    }
}
