use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{LibraryGrid, TitleBar};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let search_height = if tui.search.is_some() { 3 } else { 0 };
    let hint_height = if tui.hints.is_visible() { 1 } else { 0 };
    let layout = Layout::vertical([Length(1), Min(0), Length(search_height), Length(hint_height)]);
    let [title_area, grid_area, search_area, hint_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar::new(
        tui.heading.clone(),
        app.input_mode.label().to_string(),
        app.status_message.clone(),
    );
    title_bar.last_gesture = app.last_gesture.map(|g| g.label().to_string());
    title_bar.can_go_back = app.history.can_go_back();
    title_bar.can_go_forward = app.history.can_go_forward();
    title_bar.render(frame, title_area);

    LibraryGrid::new(&mut tui.grid, &tui.heading).render(frame, grid_area);

    if let Some(search) = tui.search.as_mut() {
        search.render(frame, search_area);
    }
    if tui.hints.is_visible() {
        tui.hints.render(frame, hint_area);
    }
}
