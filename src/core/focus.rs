//! # Directional Focus Navigation
//!
//! Turns discrete directional input (arrow keys, D-pad, swipe direction) into
//! movement across the focusable elements a host screen exposes.
//!
//! The navigator never holds element handles between calls. Every move asks
//! the host's [`FocusSurface`] for a fresh list, because the UI tree can change
//! between two key presses.
//!
//! Each navigation context picks exactly one [`NavigationPolicy`]:
//!
//! ```text
//! Grid { columns: 4 }            Cycle
//! ┌───┬───┬───┬───┐              0 → 1 → 2 → … → n-1
//! │ 0 │ 1 │ 2 │ 3 │              ↑_________________│
//! ├───┼───┼───┼───┤
//! │ 4 │ 5 │ 6 │ 7 │   clamps at every edge, wraps at both ends
//! └───┴───┴───┴───┘
//! ```

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Left and Up move toward the start of the traversal order.
    fn is_backward(self) -> bool {
        matches!(self, Direction::Left | Direction::Up)
    }
}

/// Screen-space rectangle of a focusable element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Handle to a host element that can take directional focus.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusableElement {
    pub id: u64,
    /// Position in traversal order.
    pub order: usize,
    pub bounds: Bounds,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    Nearest,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// How the host should bring a newly focused element into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollIntoView {
    pub block: ScrollAlign,
    pub inline: ScrollAlign,
    pub behavior: ScrollBehavior,
}

impl ScrollIntoView {
    pub const GRID: Self = Self {
        block: ScrollAlign::Nearest,
        inline: ScrollAlign::Nearest,
        behavior: ScrollBehavior::Instant,
    };

    pub const CYCLE: Self = Self {
        block: ScrollAlign::Center,
        inline: ScrollAlign::Center,
        behavior: ScrollBehavior::Smooth,
    };
}

/// Capability a host screen implements so the navigator can discover and
/// drive its focusable elements without touching the UI tree directly.
pub trait FocusSurface {
    /// Focusable elements currently on screen, in any order.
    fn list(&self) -> Vec<FocusableElement>;

    /// Move platform focus to `element` and scroll it into view.
    fn focus(&mut self, element: &FocusableElement, scroll: ScrollIntoView);

    /// Run the element's primary action. Returns `false` if the element no
    /// longer exists.
    fn activate(&mut self, element: &FocusableElement) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPolicy {
    /// Row-major grid of `columns`; clamps at every edge.
    Grid { columns: usize },
    /// Flat ring over the whole screen; wraps at both ends.
    Cycle,
}

/// Next index in a row-major grid. Clamps instead of wrapping: moving left
/// from column 0 or right from the last column stays put, and vertical moves
/// stop at the first or last item.
pub fn grid_step(direction: Direction, index: usize, item_count: usize, columns: usize) -> usize {
    if item_count == 0 {
        return 0;
    }
    let columns = columns.max(1);
    let last = item_count - 1;
    let index = index.min(last);
    let column = index % columns;
    match direction {
        Direction::Left if column == 0 => index,
        Direction::Left => index - 1,
        Direction::Right if column == columns - 1 => index,
        Direction::Right => (index + 1).min(last),
        Direction::Up => index.saturating_sub(columns),
        Direction::Down => index.saturating_add(columns).min(last),
    }
}

/// Next index on a ring of `item_count` elements.
pub fn cycle_step(direction: Direction, index: usize, item_count: usize) -> usize {
    if item_count == 0 {
        return 0;
    }
    let index = index % item_count;
    if direction.is_backward() {
        (index + item_count - 1) % item_count
    } else {
        (index + 1) % item_count
    }
}

/// Tracks the focused index for one screen.
#[derive(Debug)]
pub struct FocusNavigator {
    focused_index: usize,
    policy: NavigationPolicy,
    /// Identity of the item set currently governed (library id, route, ...).
    item_set: Option<String>,
    grid_scroll: ScrollIntoView,
}

impl FocusNavigator {
    pub fn new(policy: NavigationPolicy) -> Self {
        Self {
            focused_index: 0,
            policy,
            item_set: None,
            grid_scroll: ScrollIntoView::GRID,
        }
    }

    pub fn focused_index(&self) -> usize {
        self.focused_index
    }

    pub fn policy(&self) -> NavigationPolicy {
        self.policy
    }

    /// Grid width, or `None` under the cycle policy.
    pub fn columns(&self) -> Option<usize> {
        match self.policy {
            NavigationPolicy::Grid { columns } => Some(columns),
            NavigationPolicy::Cycle => None,
        }
    }

    /// Change the grid width. Ignored under the cycle policy.
    pub fn set_columns(&mut self, columns: usize) {
        if let NavigationPolicy::Grid { columns: current } = &mut self.policy {
            *current = columns.max(1);
        }
    }

    /// Override the alignment used when the grid scrolls a tile into view.
    pub fn set_grid_alignment(&mut self, align: ScrollAlign) {
        self.grid_scroll.block = align;
        self.grid_scroll.inline = align;
    }

    fn scroll_policy(&self) -> ScrollIntoView {
        match self.policy {
            NavigationPolicy::Grid { .. } => self.grid_scroll,
            NavigationPolicy::Cycle => ScrollIntoView::CYCLE,
        }
    }

    /// Point the navigator at a new item set. Focus resets to 0 when the
    /// identity differs from the current one. Returns whether it reset.
    pub fn rebind(&mut self, identity: &str) -> bool {
        if self.item_set.as_deref() == Some(identity) {
            return false;
        }
        debug!("Focus item set changed to {identity}, resetting focus");
        self.item_set = Some(identity.to_string());
        self.focused_index = 0;
        true
    }

    pub fn reset(&mut self) {
        self.focused_index = 0;
    }

    /// Enabled elements in traversal order. Rebuilt on every call.
    pub fn discover_focusable(&self, surface: &dyn FocusSurface) -> Vec<FocusableElement> {
        let mut elements: Vec<FocusableElement> =
            surface.list().into_iter().filter(|e| e.enabled).collect();
        elements.sort_by_key(|e| e.order);
        elements
    }

    /// Next index for `direction` under the current policy, without side effects.
    pub fn target_index(&self, direction: Direction, item_count: usize) -> usize {
        let index = self.focused_index.min(item_count.saturating_sub(1));
        match self.policy {
            NavigationPolicy::Grid { columns } => grid_step(direction, index, item_count, columns),
            NavigationPolicy::Cycle => cycle_step(direction, index, item_count),
        }
    }

    /// Move focus one step. Returns the new index if focus actually moved.
    pub fn move_focus(
        &mut self,
        direction: Direction,
        surface: &mut dyn FocusSurface,
    ) -> Option<usize> {
        let elements = self.discover_focusable(surface);
        if elements.is_empty() {
            self.focused_index = 0;
            return None;
        }

        // The list may have shrunk since the last move.
        let current = self.focused_index.min(elements.len() - 1);
        self.focused_index = current;

        let next = self.target_index(direction, elements.len());
        if next == current {
            return None;
        }

        self.focused_index = next;
        surface.focus(&elements[next], self.scroll_policy());
        debug!("Focus {:?}: {} -> {}", direction, current, next);
        Some(next)
    }

    /// Focus a specific index (pointer selection, restoring a position).
    pub fn focus_at(&mut self, index: usize, surface: &mut dyn FocusSurface) -> Option<usize> {
        let elements = self.discover_focusable(surface);
        let element = elements.get(index)?;
        self.focused_index = index;
        surface.focus(element, self.scroll_policy());
        Some(index)
    }

    /// Activate the element at `index`. A stale or missing target is a no-op.
    pub fn activate_index(&self, index: usize, surface: &mut dyn FocusSurface) -> bool {
        let elements = self.discover_focusable(surface);
        match elements.get(index) {
            Some(element) => surface.activate(element),
            None => {
                debug!("Activation at {index} ignored, no such element");
                false
            }
        }
    }

    /// Activate the focused element. Returns its index when something ran.
    pub fn activate(&self, surface: &mut dyn FocusSurface) -> Option<usize> {
        self.activate_index(self.focused_index, surface)
            .then_some(self.focused_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockSurface;

    #[test]
    fn test_grid_left_from_first_is_clamped() {
        assert_eq!(grid_step(Direction::Left, 0, 12, 4), 0);
    }

    #[test]
    fn test_grid_right_from_last_is_clamped() {
        assert_eq!(grid_step(Direction::Right, 11, 12, 4), 11);
    }

    #[test]
    fn test_grid_down_into_partial_row_is_clamped() {
        assert_eq!(grid_step(Direction::Down, 9, 12, 4), 11);
        assert_eq!(grid_step(Direction::Down, 5, 10, 4), 9);
    }

    #[test]
    fn test_grid_row_edges_do_not_wrap() {
        // Column 0 of row 1 stays put instead of jumping to row 0's last column.
        assert_eq!(grid_step(Direction::Left, 4, 12, 4), 4);
        assert_eq!(grid_step(Direction::Right, 3, 12, 4), 3);
        assert_eq!(grid_step(Direction::Right, 5, 12, 4), 6);
        assert_eq!(grid_step(Direction::Up, 2, 12, 4), 0);
        assert_eq!(grid_step(Direction::Up, 6, 12, 4), 2);
    }

    #[test]
    fn test_grid_handles_empty_and_zero_columns() {
        assert_eq!(grid_step(Direction::Down, 0, 0, 4), 0);
        assert_eq!(grid_step(Direction::Down, 0, 5, 0), 1);
        assert_eq!(grid_step(Direction::Right, 0, 5, 0), 0);
    }

    #[test]
    fn test_cycle_wraps_both_ways() {
        assert_eq!(cycle_step(Direction::Right, 4, 5), 0);
        assert_eq!(cycle_step(Direction::Left, 0, 5), 4);
        assert_eq!(cycle_step(Direction::Down, 2, 5), 3);
        assert_eq!(cycle_step(Direction::Up, 0, 1), 0);
    }

    #[test]
    fn test_move_focus_updates_surface_with_grid_scroll() {
        let mut surface = MockSurface::grid(12);
        let mut nav = FocusNavigator::new(NavigationPolicy::Grid { columns: 4 });

        assert_eq!(nav.move_focus(Direction::Down, &mut surface), Some(4));
        assert_eq!(nav.move_focus(Direction::Right, &mut surface), Some(5));
        assert_eq!(nav.focused_index(), 5);
        assert_eq!(surface.focused, vec![(4, ScrollIntoView::GRID), (5, ScrollIntoView::GRID)]);
    }

    #[test]
    fn test_move_focus_at_edge_does_not_touch_surface() {
        let mut surface = MockSurface::grid(12);
        let mut nav = FocusNavigator::new(NavigationPolicy::Grid { columns: 4 });

        assert_eq!(nav.move_focus(Direction::Left, &mut surface), None);
        assert_eq!(nav.move_focus(Direction::Up, &mut surface), None);
        assert!(surface.focused.is_empty());
    }

    #[test]
    fn test_cycle_policy_scrolls_smoothly_to_center() {
        let mut surface = MockSurface::grid(3);
        let mut nav = FocusNavigator::new(NavigationPolicy::Cycle);

        assert_eq!(nav.move_focus(Direction::Left, &mut surface), Some(2));
        assert_eq!(surface.focused, vec![(2, ScrollIntoView::CYCLE)]);
    }

    #[test]
    fn test_empty_surface_keeps_index_at_zero() {
        let mut surface = MockSurface::grid(0);
        let mut nav = FocusNavigator::new(NavigationPolicy::Grid { columns: 4 });
        assert_eq!(nav.move_focus(Direction::Right, &mut surface), None);
        assert_eq!(nav.focused_index(), 0);
        assert_eq!(nav.activate(&mut surface), None);
    }

    #[test]
    fn test_disabled_elements_are_skipped_and_order_respected() {
        let mut surface = MockSurface::grid(4);
        surface.elements[1].enabled = false;
        surface.elements.reverse();
        let nav = FocusNavigator::new(NavigationPolicy::Cycle);

        let ids: Vec<u64> = nav.discover_focusable(&surface).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 2, 3]);
    }

    #[test]
    fn test_stale_index_is_clamped_after_list_shrinks() {
        let mut surface = MockSurface::grid(12);
        let mut nav = FocusNavigator::new(NavigationPolicy::Grid { columns: 4 });
        nav.focus_at(11, &mut surface);

        surface.elements.truncate(6);
        assert_eq!(nav.move_focus(Direction::Left, &mut surface), Some(4));
    }

    #[test]
    fn test_rebind_resets_only_on_identity_change() {
        let mut surface = MockSurface::grid(12);
        let mut nav = FocusNavigator::new(NavigationPolicy::Grid { columns: 4 });
        assert!(nav.rebind("movies"));
        nav.move_focus(Direction::Down, &mut surface);

        assert!(!nav.rebind("movies"));
        assert_eq!(nav.focused_index(), 4);

        assert!(nav.rebind("shows"));
        assert_eq!(nav.focused_index(), 0);
    }

    #[test]
    fn test_activate_runs_focused_element() {
        let mut surface = MockSurface::grid(6);
        let mut nav = FocusNavigator::new(NavigationPolicy::Grid { columns: 3 });
        nav.move_focus(Direction::Down, &mut surface);

        assert_eq!(nav.activate(&mut surface), Some(3));
        assert_eq!(surface.activated, vec![3]);
    }

    #[test]
    fn test_activate_missing_target_is_noop() {
        let mut surface = MockSurface::grid(2);
        let nav = FocusNavigator::new(NavigationPolicy::Cycle);
        assert!(!nav.activate_index(7, &mut surface));

        // Element vanished between discovery and activation.
        surface.vanish_on_activate = true;
        assert!(!nav.activate_index(0, &mut surface));
        assert!(surface.activated.is_empty());
    }

    #[test]
    fn test_set_columns_and_alignment() {
        let mut surface = MockSurface::grid(12);
        let mut nav = FocusNavigator::new(NavigationPolicy::Grid { columns: 4 });
        nav.set_columns(0);
        assert_eq!(nav.columns(), Some(1));
        nav.set_columns(6);
        nav.set_grid_alignment(ScrollAlign::Center);

        assert_eq!(nav.move_focus(Direction::Down, &mut surface), Some(6));
        let (_, scroll) = surface.focused[0];
        assert_eq!(scroll.block, ScrollAlign::Center);
        assert_eq!(scroll.behavior, ScrollBehavior::Instant);

        let mut cycle = FocusNavigator::new(NavigationPolicy::Cycle);
        cycle.set_columns(3);
        assert_eq!(cycle.columns(), None);
    }
}
