//! Glide library exports for testing

use clap::ValueEnum;

use crate::core::settings::Settings;

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// `--remote` flag: persist a directional-mode override, or clear it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RemoteOverride {
    /// Clear any stored override and cached detection, then detect afresh.
    Auto,
    /// Force directional-remote navigation on.
    On,
    /// Force it off.
    Off,
    /// Leave the stored setting untouched.
    #[default]
    Keep,
}

impl RemoteOverride {
    /// Write this override into `settings`. Returns false for `Keep`, which
    /// leaves them untouched.
    pub fn apply_to(self, settings: &mut Settings) -> bool {
        match self {
            RemoteOverride::Auto => {
                settings.force_directional = None;
                settings.detected_directional = None;
            }
            RemoteOverride::On => settings.force_directional = Some(true),
            RemoteOverride::Off => settings.force_directional = Some(false),
            RemoteOverride::Keep => return false,
        }
        true
    }
}
