//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: location, input mode, last gesture, status
//! - `HintBar`: per-mode cheat sheet with an auto-hide deadline
//!
//! ### Stateful Components
//!
//! - `LibraryGrid`: the focusable tile grid. Its state is the focus surface
//!   and navigation host the core drives.
//! - `SearchBox`: text entry that emits filter events
//!
//! Each component file holds its state, events, rendering and tests.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── library_grid.rs  (Tile grid + player overlay)
//! ├── search_box.rs    (Filter input)
//! └── hint_bar.rs      (Bottom key hints)
//! ```

mod hint_bar;
mod title_bar;
pub use hint_bar::HintBar;
pub use title_bar::TitleBar;

pub mod library_grid;
pub mod search_box;
pub use library_grid::{LibraryGrid, LibraryGridState};
pub use search_box::{SearchBox, SearchEvent};
