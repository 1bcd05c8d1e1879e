//! # LibraryGrid Component
//!
//! Tile grid for one catalog location. This is the screen the focus navigator
//! drives: `LibraryGridState` implements `FocusSurface` and `NavigationHost`,
//! so the core can list, focus, scroll and activate tiles without knowing
//! they are terminal cells.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `LibraryGridState` lives in `TuiState`
//! - `LibraryGrid` is created each frame with borrowed state

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::action::NavigationHost;
use crate::core::config::MAX_COLUMNS;
use crate::core::focus::{Bounds, FocusSurface, FocusableElement, ScrollAlign, ScrollIntoView};
use crate::tui::catalog::{Tile, TileKind};
use crate::tui::component::Component;

/// Terminal rows per tile, borders included.
pub const TILE_HEIGHT: u16 = 5;

fn is_focusable(tile: &Tile) -> bool {
    tile.kind != TileKind::Unavailable
}

/// Persistent state for the tile grid.
pub struct LibraryGridState {
    pub tiles: Vec<Tile>,
    pub columns: usize,
    pub focused_id: Option<u64>,
    /// Draw the focus ring. Always on for remotes, on after the first arrow key otherwise.
    pub show_focus: bool,
    /// First visible tile row.
    pub scroll_row: usize,
    /// Location requested by activating a library tile, taken by the event loop.
    pub opened: Option<String>,
    /// Title shown in the playback overlay.
    pub player: Option<String>,
    bell_pending: bool,
    /// Tile area from the last render; hit testing and scrolling use it.
    area: Rect,
}

impl LibraryGridState {
    pub fn new(columns: usize, show_focus: bool) -> Self {
        Self {
            tiles: Vec::new(),
            columns: columns.max(1),
            focused_id: None,
            show_focus,
            scroll_row: 0,
            opened: None,
            player: None,
            bell_pending: false,
            area: Rect::default(),
        }
    }

    /// Swap in the tiles of a new location or filter.
    pub fn set_tiles(&mut self, tiles: Vec<Tile>) {
        self.tiles = tiles;
        self.focused_id = None;
        self.scroll_row = 0;
        self.opened = None;
    }

    /// Returns true once per boundary pulse requested by the core.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }

    fn columns(&self) -> usize {
        self.columns.clamp(1, MAX_COLUMNS)
    }

    fn tile_width(&self) -> u16 {
        (self.area.width / self.columns() as u16).max(1)
    }

    /// Whole tile rows that fit in the last rendered area.
    fn viewport_rows(&self) -> usize {
        ((self.area.height / TILE_HEIGHT) as usize).max(1)
    }

    fn total_rows(&self) -> usize {
        self.tiles.len().div_ceil(self.columns())
    }

    fn scroll_to_row(&mut self, row: usize, align: ScrollAlign) {
        let viewport = self.viewport_rows();
        match align {
            ScrollAlign::Nearest => {
                if row < self.scroll_row {
                    self.scroll_row = row;
                } else if row >= self.scroll_row + viewport {
                    self.scroll_row = row + 1 - viewport;
                }
            }
            ScrollAlign::Center => self.scroll_row = row.saturating_sub(viewport / 2),
        }
    }

    /// Map a terminal cell to the focus index of the tile under it.
    /// Disabled tiles and gaps return `None`.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<usize> {
        let area = self.area;
        if col < area.x || row < area.y || col >= area.x + area.width || row >= area.y + area.height {
            return None;
        }
        let column = ((col - area.x) / self.tile_width()) as usize;
        if column >= self.columns() {
            return None;
        }
        let tile_row = ((row - area.y) / TILE_HEIGHT) as usize + self.scroll_row;
        let index = tile_row * self.columns() + column;
        let tile = self.tiles.get(index)?;
        if !is_focusable(tile) {
            return None;
        }
        Some(self.tiles[..index].iter().filter(|t| is_focusable(t)).count())
    }

    fn focused_title(&self) -> Option<&str> {
        let id = self.focused_id?;
        self.tiles.iter().find(|t| t.id == id).map(|t| t.title.as_str())
    }

    /// Title of the focused tile, for menus and status text.
    pub fn focused_label(&self) -> String {
        self.focused_title().unwrap_or("nothing").to_string()
    }
}

impl FocusSurface for LibraryGridState {
    fn list(&self) -> Vec<FocusableElement> {
        let columns = self.columns();
        let width = self.tile_width() as f32;
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| FocusableElement {
                id: tile.id,
                order: i,
                bounds: Bounds {
                    x: (i % columns) as f32 * width,
                    y: (i / columns) as f32 * TILE_HEIGHT as f32,
                    width,
                    height: TILE_HEIGHT as f32,
                },
                enabled: is_focusable(tile),
            })
            .collect()
    }

    fn focus(&mut self, element: &FocusableElement, scroll: ScrollIntoView) {
        self.focused_id = Some(element.id);
        if let Some(position) = self.tiles.iter().position(|t| t.id == element.id) {
            // Terminal scrolling is instant; smooth requests land the same way.
            self.scroll_to_row(position / self.columns(), scroll.block);
        }
    }

    fn activate(&mut self, element: &FocusableElement) -> bool {
        let Some(tile) = self.tiles.iter().find(|t| t.id == element.id) else {
            return false;
        };
        match &tile.kind {
            TileKind::Library(location) => {
                debug!("Opening {location}");
                self.opened = Some(location.clone());
                true
            }
            TileKind::Media => {
                self.player = Some(tile.title.clone());
                true
            }
            TileKind::Unavailable => false,
        }
    }
}

impl NavigationHost for LibraryGridState {
    /// The player overlay claims back before history does.
    fn on_back(&mut self) -> bool {
        self.player.take().is_some()
    }

    fn haptic_pulse(&mut self) {
        self.bell_pending = true;
    }
}

/// Transient render wrapper for the tile grid.
pub struct LibraryGrid<'a> {
    state: &'a mut LibraryGridState,
    heading: &'a str,
}

impl<'a> LibraryGrid<'a> {
    pub fn new(state: &'a mut LibraryGridState, heading: &'a str) -> Self {
        Self { state, heading }
    }

    fn render_tile(&self, frame: &mut Frame, tile: &Tile, area: Rect) {
        let focused = self.state.show_focus && self.state.focused_id == Some(tile.id);
        let (border_style, text_style) = match (&tile.kind, focused) {
            (_, true) => (
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            (TileKind::Unavailable, false) => (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            ),
            _ => (Style::default().fg(Color::Gray), Style::default().fg(Color::Gray)),
        };

        let caption = match tile.kind {
            TileKind::Library(_) => "Library",
            TileKind::Media => "",
            TileKind::Unavailable => "Unavailable",
        };
        let label_width = area.width.saturating_sub(2) as usize;
        let lines = vec![
            Line::from(truncate_to_width(&tile.title, label_width)),
            Line::from(truncate_to_width(caption, label_width)).style(Style::default().fg(Color::DarkGray)),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(text_style)
            .block(Block::default().borders(Borders::ALL).border_style(border_style));
        frame.render_widget(paragraph, area);
    }

    fn render_player(&self, frame: &mut Frame, area: Rect, title: &str) {
        let overlay = centered_rect(60, 40, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Now Playing ")
            .title_bottom(Line::from(" Esc or swipe right to stop ").centered());
        let body = Paragraph::new(vec![
            Line::default(),
            Line::from(format!("▶ {title}")).style(Style::default().add_modifier(Modifier::BOLD)),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(body, overlay);
    }
}

impl Component for LibraryGrid<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.heading));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.state.area = inner;

        if self.state.tiles.is_empty() {
            let empty = Paragraph::new("Nothing here yet.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, inner);
            return;
        }

        // A resize can leave the offset past the end.
        let viewport = self.state.viewport_rows();
        let max_scroll = self.state.total_rows().saturating_sub(viewport);
        self.state.scroll_row = self.state.scroll_row.min(max_scroll);

        let columns = self.state.columns();
        let tile_width = self.state.tile_width();
        let first = self.state.scroll_row * columns;
        for (offset, tile) in self.state.tiles.iter().skip(first).enumerate() {
            let row = (offset / columns) as u16;
            if (row + 1) * TILE_HEIGHT > inner.height {
                break;
            }
            let rect = Rect::new(
                inner.x + (offset % columns) as u16 * tile_width,
                inner.y + row * TILE_HEIGHT,
                tile_width,
                TILE_HEIGHT,
            );
            self.render_tile(frame, tile, rect);
        }

        if let Some(title) = self.state.player.clone() {
            self.render_player(frame, area, &title);
        }
    }
}

/// Cut `s` to at most `max_width` display columns, ending in "…" when cut.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
