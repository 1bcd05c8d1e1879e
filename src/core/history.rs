//! # Navigation History
//!
//! Browser-style history of visited locations with a cursor.
//!
//! ```text
//! push(A) push(B) back()    push(C)
//! [A]     [A, B]  [A, B]    [A, C]     B is discarded: only the branch
//!  ^          ^    ^            ^      taken after going back survives
//! ```
//!
//! Only confirmed navigations push. A gesture that fails to resolve to a
//! navigation never touches the stack.

use std::collections::VecDeque;

use log::debug;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone)]
pub struct HistoryStack<L> {
    entries: VecDeque<L>,
    /// Always `< entries.len()`.
    cursor: usize,
    capacity: usize,
}

impl<L: Clone + PartialEq> HistoryStack<L> {
    /// Start a history at `initial`. `capacity` is clamped to at least 1.
    pub fn new(initial: L, capacity: usize) -> Self {
        let mut entries = VecDeque::with_capacity(capacity.clamp(1, 64));
        entries.push_back(initial);
        Self {
            entries,
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn current(&self) -> &L {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Record a confirmed navigation. Everything after the cursor is dropped
    /// first. Pushing the location already under the cursor is ignored.
    pub fn push(&mut self, location: L) {
        if *self.current() == location {
            return;
        }

        let discarded = self.entries.len() - (self.cursor + 1);
        if discarded > 0 {
            debug!("History push discards {discarded} forward entries");
            self.entries.truncate(self.cursor + 1);
        }

        self.entries.push_back(location);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry. `None` at the oldest entry; the stack is unchanged.
    pub fn back(&mut self) -> Option<&L> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one entry. `None` at the newest entry.
    pub fn forward(&mut self) -> Option<&L> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    pub fn entries(&self) -> impl Iterator<Item = &L> {
        self.entries.iter()
    }
}
