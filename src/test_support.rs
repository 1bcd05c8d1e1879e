//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::action::NavigationHost;
use crate::core::config::{CliOverrides, GlideConfig, PolicyKind, resolve};
use crate::core::focus::{Bounds, FocusSurface, FocusableElement, ScrollIntoView};
use crate::core::input_mode::InputMode;
use crate::core::state::App;

/// In-memory screen of `elements` that records what the core asked of it.
#[derive(Debug, Default)]
pub struct MockSurface {
    pub elements: Vec<FocusableElement>,
    /// `(element id, scroll request)` for every focus call, in order.
    pub focused: Vec<(u64, ScrollIntoView)>,
    pub activated: Vec<u64>,
    /// Simulates an element removed between discovery and activation.
    pub vanish_on_activate: bool,
    pub handles_back: bool,
    pub haptic_pulses: usize,
}

impl MockSurface {
    /// `count` enabled elements with ids and traversal order `0..count`.
    pub fn grid(count: usize) -> Self {
        let elements = (0..count)
            .map(|i| FocusableElement {
                id: i as u64,
                order: i,
                bounds: Bounds {
                    x: (i % 4) as f32 * 100.0,
                    y: (i / 4) as f32 * 150.0,
                    width: 100.0,
                    height: 150.0,
                },
                enabled: true,
            })
            .collect();
        Self {
            elements,
            ..Default::default()
        }
    }
}

impl FocusSurface for MockSurface {
    fn list(&self) -> Vec<FocusableElement> {
        self.elements.clone()
    }

    fn focus(&mut self, element: &FocusableElement, scroll: ScrollIntoView) {
        self.focused.push((element.id, scroll));
    }

    fn activate(&mut self, element: &FocusableElement) -> bool {
        if self.vanish_on_activate {
            return false;
        }
        self.activated.push(element.id);
        true
    }
}

impl NavigationHost for MockSurface {
    fn on_back(&mut self) -> bool {
        self.handles_back
    }

    fn haptic_pulse(&mut self) {
        self.haptic_pulses += 1;
    }
}

/// Defaults with a fixed 4-column grid, independent of the environment.
pub fn test_config() -> crate::core::config::ResolvedConfig {
    resolve(
        &GlideConfig::default(),
        CliOverrides {
            columns: Some(4),
            policy: Some(PolicyKind::Grid),
        },
    )
}

/// Creates a test App in touch mode.
pub fn test_app() -> App {
    App::new(&test_config(), InputMode::Touch)
}
