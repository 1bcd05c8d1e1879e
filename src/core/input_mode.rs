//! # Input Mode Detection
//!
//! Decides once, at startup, whether the client runs on a directional-remote
//! device (TV, set-top box) or a pointer/touch device. The answer gates which
//! input path is active:
//!
//! - `Directional`: D-pad drives the focus navigator, gestures are off, the
//!   grid keeps the focused tile centered.
//! - `Touch`: gestures are on, the focus navigator still serves keyboards.
//!
//! The heuristic sits behind [`DirectionalInputDetector`] so a platform
//! capability query can replace it without touching the navigator or the
//! recognizer. A stored force flag always beats whatever the detector says.

use std::path::Path;

use log::{debug, info, warn};

use crate::core::focus::ScrollAlign;
use crate::core::settings::Settings;

/// Single boolean question: should directional-remote navigation be enabled?
pub trait DirectionalInputDetector {
    fn is_directional(&self) -> bool;
}

impl<F: Fn() -> bool> DirectionalInputDetector for F {
    fn is_directional(&self) -> bool {
        self()
    }
}

/// What the detector gets to look at.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentProbe {
    /// Platform identifier (user agent, OS/terminal string, ...).
    pub platform: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub touch_points: u32,
}

impl EnvironmentProbe {
    pub fn has_touch(&self) -> bool {
        self.touch_points > 0
    }
}

/// Known TV and remote-driven platform signatures, matched case-insensitively.
const TV_SIGNATURES: &[&str] = &[
    "smart-tv",
    "smarttv",
    "googletv",
    "google tv",
    "android tv",
    "appletv",
    "apple tv",
    "tizen",
    "webos",
    "web0s",
    "roku",
    "hbbtv",
    "netcast",
    "viera",
    "bravia",
    "aftb",
    "aftm",
    "aftt",
    "crkey",
    "playstation",
    "xbox",
];

/// Handheld signatures that rule out remote mode even on a large screen.
const HANDHELD_SIGNATURES: &[&str] = &["iphone", "ipad", "ipod", "mobile", "tablet"];

pub const DEFAULT_MIN_SCREEN_WIDTH: u32 = 1280;
pub const DEFAULT_MIN_SCREEN_HEIGHT: u32 = 720;

/// Signature match first, then `large screen AND no touch`.
#[derive(Debug, Clone)]
pub struct HeuristicDetector {
    pub probe: EnvironmentProbe,
    pub min_screen_width: u32,
    pub min_screen_height: u32,
}

impl HeuristicDetector {
    pub fn new(probe: EnvironmentProbe) -> Self {
        Self {
            probe,
            min_screen_width: DEFAULT_MIN_SCREEN_WIDTH,
            min_screen_height: DEFAULT_MIN_SCREEN_HEIGHT,
        }
    }
}

impl DirectionalInputDetector for HeuristicDetector {
    fn is_directional(&self) -> bool {
        let platform = self.probe.platform.to_lowercase();
        if TV_SIGNATURES.iter().any(|sig| platform.contains(sig)) {
            return true;
        }
        if HANDHELD_SIGNATURES.iter().any(|sig| platform.contains(sig)) {
            return false;
        }
        let large_screen = self.probe.screen_width >= self.min_screen_width
            && self.probe.screen_height >= self.min_screen_height;
        large_screen && !self.probe.has_touch()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Touch,
    Directional,
}

/// Parameters each mode tunes on the other components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputProfile {
    pub gestures_enabled: bool,
    pub focus_ring_visible: bool,
    pub grid_alignment: ScrollAlign,
}

impl InputMode {
    pub fn profile(self) -> InputProfile {
        match self {
            InputMode::Touch => InputProfile {
                gestures_enabled: true,
                focus_ring_visible: false,
                grid_alignment: ScrollAlign::Nearest,
            },
            InputMode::Directional => InputProfile {
                gestures_enabled: false,
                focus_ring_visible: true,
                grid_alignment: ScrollAlign::Center,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InputMode::Touch => "touch",
            InputMode::Directional => "remote",
        }
    }
}

/// Apply the force flag over the cached detection, running the detector only
/// when nothing is cached yet.
pub fn resolve_input_mode(detector: &dyn DirectionalInputDetector, settings: &mut Settings) -> InputMode {
    let detected = match settings.detected_directional {
        Some(cached) => {
            debug!("Using cached detection: directional={cached}");
            cached
        }
        None => {
            let detected = detector.is_directional();
            settings.detected_directional = Some(detected);
            detected
        }
    };

    let directional = settings.force_directional.unwrap_or(detected);
    if let Some(forced) = settings.force_directional
        && forced != detected
    {
        info!("Input mode forced to directional={forced} (detected {detected})");
    }

    if directional {
        InputMode::Directional
    } else {
        InputMode::Touch
    }
}

/// Startup entry point: load settings from `path`, resolve, persist the
/// detection cache. Settings I/O failures are logged and never block startup.
pub fn detect_at_startup(detector: &dyn DirectionalInputDetector, path: Option<&Path>) -> InputMode {
    let mut settings = match path.map(Settings::load_from) {
        Some(Ok(settings)) => settings,
        Some(Err(e)) => {
            warn!("Ignoring unreadable settings: {e}");
            Settings::default()
        }
        None => Settings::default(),
    };

    let before = settings.clone();
    let mode = resolve_input_mode(detector, &mut settings);
    info!("Input mode: {}", mode.label());

    if let Some(path) = path
        && settings != before
        && let Err(e) = settings.save_to(path)
    {
        warn!("Failed to cache input mode detection: {e}");
    }

    mode
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(platform: &str, width: u32, height: u32, touch_points: u32) -> HeuristicDetector {
        HeuristicDetector::new(EnvironmentProbe {
            platform: platform.to_string(),
            screen_width: width,
            screen_height: height,
            touch_points,
        })
    }

    #[test]
    fn test_tv_signature_wins_over_small_touch_screen() {
        let detector = probe("Mozilla/5.0 (SMART-TV; Linux; Tizen 6.0)", 960, 540, 5);
        assert!(detector.is_directional());
    }

    #[test]
    fn test_handheld_signature_rules_out_remote() {
        let detector = probe("Mozilla/5.0 (iPad; CPU OS 17_0)", 2048, 1536, 0);
        assert!(!detector.is_directional());
    }

    #[test]
    fn test_large_screen_without_touch_is_directional() {
        assert!(probe("linux xterm", 1920, 1080, 0).is_directional());
        assert!(!probe("linux xterm", 1920, 1080, 10).is_directional());
        assert!(!probe("linux xterm", 1024, 768, 0).is_directional());
    }

    #[test]
    fn test_thresholds_are_tunable() {
        let mut detector = probe("linux", 800, 600, 0);
        assert!(!detector.is_directional());
        detector.min_screen_width = 640;
        detector.min_screen_height = 480;
        assert!(detector.is_directional());
    }

    #[test]
    fn test_closure_is_a_detector() {
        let platform_says_remote = || true;
        let mut settings = Settings::default();
        assert_eq!(resolve_input_mode(&platform_says_remote, &mut settings), InputMode::Directional);
    }

    #[test]
    fn test_force_flag_wins_over_detection() {
        let mut settings = Settings {
            force_directional: Some(false),
            detected_directional: None,
        };
        let mode = resolve_input_mode(&|| true, &mut settings);
        assert_eq!(mode, InputMode::Touch);
        assert_eq!(settings.detected_directional, Some(true));

        settings.force_directional = Some(true);
        assert_eq!(resolve_input_mode(&|| false, &mut settings), InputMode::Directional);
    }

    #[test]
    fn test_detection_result_is_cached() {
        let mut settings = Settings::default();
        assert_eq!(resolve_input_mode(&|| false, &mut settings), InputMode::Touch);
        assert_eq!(settings.detected_directional, Some(false));
    }

    #[test]
    fn test_cached_detection_skips_detector() {
        let mut settings = Settings {
            force_directional: None,
            detected_directional: Some(true),
        };
        let never_called = || -> bool { panic!("detector ran despite a cached result") };
        assert_eq!(resolve_input_mode(&never_called, &mut settings), InputMode::Directional);
        assert_eq!(settings.detected_directional, Some(true));
    }

    #[test]
    fn test_profiles_gate_components() {
        let remote = InputMode::Directional.profile();
        assert!(!remote.gestures_enabled);
        assert_eq!(remote.grid_alignment, ScrollAlign::Center);

        let touch = InputMode::Touch.profile();
        assert!(touch.gestures_enabled);
        assert_eq!(touch.grid_alignment, ScrollAlign::Nearest);
    }

    #[test]
    fn test_detect_at_startup_persists_detection() {
        let dir = std::env::temp_dir().join(format!("glide-mode-{}", std::process::id()));
        let path = dir.join("settings.json");

        assert_eq!(detect_at_startup(&|| true, Some(&path)), InputMode::Directional);
        let stored = Settings::load_from(&path).unwrap();
        assert_eq!(stored.detected_directional, Some(true));

        // The next start is served from the cache.
        assert_eq!(detect_at_startup(&|| false, Some(&path)), InputMode::Directional);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_detect_at_startup_without_path() {
        assert_eq!(detect_at_startup(&|| false, None), InputMode::Touch);
    }
}
