//! # Core Input Interpretation
//!
//! This module contains Glide's input-interpretation layer.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌──────────────────────────────┐
//!                    │            CORE              │
//!                    │        (this module)         │
//!                    │                              │
//!                    │  • GestureRecognizer         │
//!                    │  • FocusNavigator            │
//!                    │  • HistoryStack              │
//!                    │  • InputMode detection       │
//!                    │  • Action → update() → Effect│
//!                    │                              │
//!                    │  No rendering. No network.   │
//!                    └──────────────┬───────────────┘
//!                                   │ FocusSurface / NavigationHost
//!            ┌──────────────────────┼──────────────────────┐
//!            ▼                      ▼                      ▼
//!     ┌────────────┐         ┌────────────┐         ┌────────────┐
//!     │    TUI     │         │   Web      │         │   TV       │
//!     │  Adapter   │         │  Adapter   │         │  Adapter   │
//!     │ (ratatui)  │         │  (future)  │         │  (future)  │
//!     └────────────┘         └────────────┘         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`gesture`]: touch samples in, `GestureEvent`s out
//! - [`focus`]: directional moves over host-provided focusable elements
//! - [`history`]: browser-style back/forward stack
//! - [`input_mode`]: one-shot "is this a remote-driven device" decision
//! - [`intent`]: keys and gestures mapped onto one intent vocabulary
//! - [`state`] / [`action`]: the `App` struct and its reducer
//! - [`config`] / [`settings`]: tuning file and durable flags

pub mod action;
pub mod config;
pub mod focus;
pub mod gesture;
pub mod history;
pub mod input_mode;
pub mod intent;
pub mod settings;
pub mod state;
